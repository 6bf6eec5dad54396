//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::types::{FieldWeight, Match, Record, SearchParams};

/// Create a record with the two fields the test suite standardizes on.
pub fn make_record(id: u32, name: &str, city: &str) -> Record {
    let mut record = Record::new(id);
    if !name.is_empty() {
        record = record.with_field("name", name);
    }
    if !city.is_empty() {
        record = record.with_field("city", city);
    }
    record
}

/// The canonical two-field configuration: name weighted 2.0, city 1.0.
pub fn name_city_params() -> SearchParams {
    SearchParams::new(vec![
        FieldWeight::new("name", 2.0),
        FieldWeight::new("city", 1.0),
    ])
}

/// A bare match carrying only an id and a composite score.
///
/// Merge logic never inspects field_scores, so most merge tests don't need
/// them populated.
pub fn score_only_match(id: u32, score: f64) -> Match {
    Match {
        record: Record::new(id),
        score,
        field_scores: Vec::new(),
    }
}
