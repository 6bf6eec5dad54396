// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind match ranking.
//!
//! A record's composite score is the fold of its per-field sub-scores with
//! the configured weights: `sum(subscore[i] + weight[i])`. Weights are
//! additive bonuses, not multiplicative factors: a field weighted 2.0 adds
//! two points to whatever the engine scored it, it does not double it.
//!
//! Missing fields contribute [`MISSING_FIELD_PENALTY`] instead of being
//! dropped from the sum. Dropping them would bias scores upward: a record
//! strong in one field but empty everywhere else would outrank a record
//! matching all fields. The sentinel keeps such records *rankable* (a single
//! strong field can still surface when nothing better exists) while pushing
//! them below any record that matched every configured field.
//!
//! # Constants
//!
//! | Constant | Value | Why this value |
//! |----------|-------|----------------|
//! | `MISSING_FIELD_PENALTY` | -9999.0 | Dominates any achievable field score; one missing field drags the composite firmly negative |
//! | `EXACT_WORD_SCORE` | 100.0 | Exact word hit, per tier hierarchy |
//! | `SUBSTRING_SCORE` | 50.0 | Substring/prefix hit |
//! | `FUZZY_DISTANCE_1_SCORE` | 30.0 | One edit away |
//! | `FUZZY_DISTANCE_2_SCORE` | 15.0 | Two edits away |
//! | `TERM_LENGTH_PENALTY` | 0.01 | Tiebreaker: shorter matched terms are more specific |

use crate::types::{FieldWeight, SubScore};

// =============================================================================
// SCORING CONSTANTS
// =============================================================================

/// Sentinel contributed by a field slot with no sub-score.
///
/// The value comes from the system this crate grew out of; anything that
/// satisfies the dominance assertion below works.
pub const MISSING_FIELD_PENALTY: f64 = -9999.0;

/// Score for an exact word match within a field.
pub const EXACT_WORD_SCORE: f64 = 100.0;

/// Score for a substring (including prefix) match within a field.
pub const SUBSTRING_SCORE: f64 = 50.0;

/// Scores for fuzzy matches by edit distance.
pub const FUZZY_DISTANCE_1_SCORE: f64 = 30.0;
pub const FUZZY_DISTANCE_2_SCORE: f64 = 15.0;

/// Penalty per character of the matched term (shorter terms are more
/// specific, so "cpasync" outranks "asynchronous" at equal distance).
pub const TERM_LENGTH_PENALTY: f64 = 0.01;

// Static assertion: sentinel dominance. A perfect exact match on one field
// can never lift a record with a missing field back above zero, so any record
// that matched every configured field (non-negative sub-scores) outranks it.
// Evaluated at build time - if it fails, the crate won't build.
const _: () = {
    assert!(MISSING_FIELD_PENALTY + EXACT_WORD_SCORE < 0.0);
    // Tier hierarchy: exact > substring > fuzzy(1) > fuzzy(2), with the
    // length penalty too small to invert adjacent tiers for sane term sizes.
    assert!(EXACT_WORD_SCORE > SUBSTRING_SCORE);
    assert!(SUBSTRING_SCORE > FUZZY_DISTANCE_1_SCORE);
    assert!(FUZZY_DISTANCE_1_SCORE > FUZZY_DISTANCE_2_SCORE);
};

/// Reduce a match's per-field sub-scores into one composite score.
///
/// `field_scores` and `weights` must be aligned index-for-index in the same
/// field order; producing them from different configurations is a caller
/// contract violation (checked in debug builds, silent garbage in release;
/// see `contracts`).
pub fn composite(field_scores: &[SubScore], weights: &[FieldWeight]) -> f64 {
    debug_assert_eq!(
        field_scores.len(),
        weights.len(),
        "sub-score vector misaligned with weight list"
    );

    field_scores
        .iter()
        .zip(weights)
        .map(|(slot, fw)| match slot.value() {
            Some(score) => score + fw.weight,
            None => MISSING_FIELD_PENALTY,
        })
        .sum()
}
