// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-call field projection.
//!
//! Before the folded-text pass can run, every record needs a side-map of
//! normalized field values. The side-map is *derived, per-call state*: it is
//! computed here, handed to exactly one engine pass, and dropped. It is never
//! cached across calls and never attached to the record itself; a normalized
//! map stored on a long-lived record would leak one query's state into the
//! next in a concurrent server.
//!
//! Empty and absent fields are skipped rather than inserted as `""`. An empty
//! string would otherwise fuzzy-match everything and produce spurious hits.

use crate::normalize::Normalizer;
use crate::types::Record;
use std::collections::HashMap;

/// Field name → normalized (or original) text for one record, one call.
pub type SideMap = HashMap<String, String>;

/// A record paired with the field view one engine pass matches against.
///
/// For the original-text pass the view carries the record's own field text;
/// for the folded pass it carries the normalized side-map. Either way the
/// engine sees the same shape.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub record: &'a Record,
    pub fields: SideMap,
}

/// Project the requested fields of one record through a normalizer.
///
/// The returned map has an entry for every requested field whose original
/// value is non-empty; absent or empty fields are skipped. The record is not
/// mutated.
pub fn project<N: Normalizer>(record: &Record, fields: &[String], normalizer: &N) -> SideMap {
    let mut side_map = SideMap::with_capacity(fields.len());
    for name in fields {
        match record.field(name) {
            Some(value) if !value.is_empty() => {
                side_map.insert(name.clone(), normalizer.normalize(value));
            }
            _ => {}
        }
    }
    side_map
}

/// Build folded-text candidates for a whole collection.
pub fn normalized_candidates<'a, N: Normalizer>(
    records: &'a [Record],
    fields: &[String],
    normalizer: &N,
) -> Vec<Candidate<'a>> {
    records
        .iter()
        .map(|record| Candidate {
            record,
            fields: project(record, fields, normalizer),
        })
        .collect()
}

/// Build original-text candidates for a whole collection.
///
/// Same skip-empty rule as [`project`], without the normalization step, so
/// both passes flow through one engine entry point.
pub fn original_candidates<'a>(records: &'a [Record], fields: &[String]) -> Vec<Candidate<'a>> {
    records
        .iter()
        .map(|record| {
            let mut side_map = SideMap::with_capacity(fields.len());
            for name in fields {
                match record.field(name) {
                    Some(value) if !value.is_empty() => {
                        side_map.insert(name.clone(), value.to_string());
                    }
                    _ => {}
                }
            }
            Candidate {
                record,
                fields: side_map,
            }
        })
        .collect()
}
