// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Script folding: the text transform that lets "café" match "cafe".
//!
//! The merge pipeline only assumes a pure, total, deterministic
//! `normalize(text) -> text`. That seam is the [`Normalizer`] trait, so a full
//! transliteration engine (Cyrillic → Latin, pinyin, ICU) can plug in without
//! touching the rest of the crate. The built-in [`ScriptFolder`] covers the
//! common case: decompose, strip combining marks, lowercase, collapse
//! whitespace.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// A pure text transform mapping one script/representation to a canonical
/// comparable form.
///
/// Implementations must be deterministic and total: same input, same output,
/// never failing on valid string input. The projector calls this once per
/// requested field per search operation.
pub trait Normalizer {
    fn normalize(&self, text: &str) -> String;
}

/// The built-in normalizer: diacritic folding plus case folding.
///
/// This enables fuzzy matching between ASCII and accented versions:
/// - "café" → "cafe"
/// - "tummalachērla" → "tummalacherla"
/// - "harīṣh" → "harish"
/// - "naïve" → "naive"
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptFolder;

impl Normalizer for ScriptFolder {
    fn normalize(&self, text: &str) -> String {
        fold(text)
    }
}

/// Normalize a string for cross-script matching: lowercase, strip diacritics,
/// and collapse whitespace.
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks (category Mn = Mark, Nonspacing)
/// 3. Lowercase
/// 4. Collapse whitespace
///
/// # Algorithm (without unicode-normalization)
///
/// 1. Lowercase only (assumes input is pre-normalized or ASCII)
/// 2. Collapse whitespace
#[cfg(feature = "unicode-normalization")]
pub fn fold(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lightweight fallback (no unicode-normalization dependency).
/// Just lowercases and collapses whitespace.
#[cfg(not(feature = "unicode-normalization"))]
pub fn fold(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if a character is a combining mark (diacritic).
///
/// Combining marks have Unicode category "Mn" (Mark, Nonspacing).
/// Examples: ́ (acute), ̄ (macron), ̣ (dot below)
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    // Unicode category Mn (Mark, Nonspacing) range
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{0C00}'..='\u{0C7F}' |  // Telugu (some combining marks)
        '\u{0900}'..='\u{097F}' |  // Devanagari (some combining marks)
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
