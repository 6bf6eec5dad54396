// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a merged fuzzy search result.
//!
//! These types define how records, per-field weights, and ranked matches fit
//! together. The invariants are few but load-bearing:
//!
//! - **Match**: `field_scores.len()` equals the configured weight list length,
//!   index-for-index in the same field order. The composite scorer folds the
//!   two slices together and has no way to recover from a misalignment.
//!
//! - **Ranked sets** (`Vec<Match>`): sorted descending by `score`, record ids
//!   unique within the set. Both engine passes and the merger produce sets
//!   satisfying this; the merger additionally *requires* it of its inputs.
//!
//! Rather than trusting yourself to remember these, call the checks in
//! `contracts` from tests and debug builds.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Type-safe record identifier.
///
/// Record identity is the key used to recognize "the same record" across two
/// independently computed match sets. Comparison is exact; there is no fuzzy
/// identity matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct RecordId(pub u32);

impl RecordId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for RecordId {
    fn from(id: u32) -> Self {
        RecordId(id)
    }
}

// =============================================================================
// RECORDS AND CONFIGURATION
// =============================================================================

/// An identified entity with named string fields.
///
/// Records are immutable during a search operation. Normalized projections of
/// their fields live in a per-call side-map (see `project`), never on the
/// record itself, so long-lived records are safe to share across queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    /// Field name → original text. Missing fields are simply absent.
    pub fields: HashMap<String, String>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    /// Builder-style field setter for tests and small callers.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// The original text of a field, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// How much one field's match quality contributes to a record's composite
/// score. Weights are *additive* bonuses on top of the raw sub-score, not
/// multiplicative factors.
///
/// The ordered weight list is fixed per search configuration and shared
/// between the original-text and folded-text passes; the merger's scores are
/// only comparable because both passes used the same list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWeight {
    pub field: String,
    pub weight: f64,
}

impl FieldWeight {
    pub fn new(field: impl Into<String>, weight: f64) -> Self {
        Self {
            field: field.into(),
            weight,
        }
    }
}

/// Engine knobs shared by both passes of one search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Per-field weights, in the fixed field order used for sub-score slots.
    pub weights: Vec<FieldWeight>,
    /// Matches with a composite score below this are dropped.
    pub threshold: f64,
    /// Maximum number of matches returned by one engine pass.
    pub limit: usize,
}

impl SearchParams {
    pub fn new(weights: Vec<FieldWeight>) -> Self {
        Self {
            weights,
            threshold: f64::NEG_INFINITY,
            limit: usize::MAX,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// The configured field names, in weight order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.weights.iter().map(|w| w.field.as_str())
    }
}

// =============================================================================
// MATCHES
// =============================================================================

/// One field slot's contribution to a match.
///
/// An explicit sum type instead of a raw `f64` (or worse, an out-of-bounds
/// array read): a field whose text was absent, or for which the engine found
/// no match, is `Missing` and scored via the sentinel penalty in `scoring`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SubScore {
    Scored(f64),
    Missing,
}

impl SubScore {
    /// The raw score, if this slot matched.
    #[inline]
    pub fn value(self) -> Option<f64> {
        match self {
            SubScore::Scored(s) => Some(s),
            SubScore::Missing => None,
        }
    }
}

impl From<Option<f64>> for SubScore {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(s) => SubScore::Scored(s),
            None => SubScore::Missing,
        }
    }
}

/// One candidate produced by a match-engine pass.
///
/// Two matches are the same candidate iff `record.id` is equal. The record is
/// carried by value so a result set stays self-contained after the collection
/// it was computed against goes away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub record: Record,
    /// Composite score; higher is better.
    pub score: f64,
    /// Per-field sub-scores, aligned with the configured weight list.
    pub field_scores: Vec<SubScore>,
}

impl Match {
    /// Shorthand for the matched record's identifier.
    #[inline]
    pub fn id(&self) -> RecordId {
        self.record.id
    }
}
