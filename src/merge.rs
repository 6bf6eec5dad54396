// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Merge-and-rerank: one ranked result from two representations.
//!
//! A query typed in Latin script should find a record stored as "Tōkyō", so
//! the engine runs twice, once over the original field text and once over a
//! script-folded side-map, and the two ranked sets get merged here. For every
//! record the merged set keeps whichever representation scored higher,
//! without duplicating or losing records.
//!
//! A document should appear at most once in merged results. Sounds obvious,
//! but it's easy to mess up when the same record matches in both passes.
//! Deduplication is by record id *only*, never by a composite key.
//!
//! **Invariants**:
//! - every id present in either input appears exactly once in the output;
//! - the kept match scores `max(original, normalized)` for its record, with
//!   ties carrying the folded-pass match;
//! - output sorted descending by score, equal scores in stable order.

use crate::contracts::{check_ranked, check_same_weight_order};
use crate::engine::MatchEngine;
use crate::normalize::Normalizer;
use crate::project::normalized_candidates;
use crate::types::{Match, Record, SearchParams};
use std::collections::HashMap;
use tracing::debug;

/// Merge two ranked match sets computed over the same record collection.
///
/// `original` ranks matches over original field text, `normalized` over the
/// script-folded side-maps, both for the same query and weight order. Each
/// input must already be internally deduplicated and sorted descending;
/// a malformed input is a caller bug, checked only in debug builds.
///
/// In the chance that a folded-text match scores at least as well as its
/// original-text counterpart, it replaces the original in place; folded-only
/// matches are appended so they are never silently dropped. The combined set
/// is then re-sorted. `Vec::sort_by` is stable, so equal-score entries keep
/// their pre-sort relative order rather than being reordered arbitrarily.
pub fn merge_ranked(original: Vec<Match>, normalized: Vec<Match>) -> Vec<Match> {
    check_ranked(&original);
    check_ranked(&normalized);

    // Nothing to merge against: the other set already is the answer.
    if original.is_empty() {
        return normalized;
    }
    if normalized.is_empty() {
        return original;
    }

    let mut merged = original;
    let positions: HashMap<_, _> = merged
        .iter()
        .enumerate()
        .map(|(idx, m)| (m.id(), idx))
        .collect();

    let mut replaced = 0usize;
    let mut appended = 0usize;
    for m in normalized {
        match positions.get(&m.id()) {
            // `<=`: a folded match that ties its counterpart wins, so the
            // representation that was actually searched last is the one kept.
            Some(&idx) => {
                if merged[idx].score <= m.score {
                    merged[idx] = m;
                    replaced += 1;
                }
            }
            None => {
                merged.push(m);
                appended += 1;
            }
        }
    }

    merged.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(replaced, appended, total = merged.len(), "merged ranked sets");
    merged
}

/// Run the folded-text pass and merge it with a previously computed
/// original-text result.
///
/// `previous` must have been produced by `engine` against the same `records`
/// and `query`, with the same weight order as `params`: scores from
/// different configurations are not comparable and merging them is
/// undefined behavior (debug-checked, not defended against in release).
///
/// Side-maps for `fields_to_normalize` are built fresh inside this call and
/// dropped before it returns; nothing is cached across calls, so concurrent
/// queries over shared records never observe each other's state.
pub fn merge_with_normalized_matches<E: MatchEngine, N: Normalizer>(
    engine: &E,
    normalizer: &N,
    records: &[Record],
    fields_to_normalize: &[String],
    query: &str,
    previous: Vec<Match>,
    params: &SearchParams,
) -> Vec<Match> {
    check_same_weight_order(&previous, params);

    let candidates = normalized_candidates(records, fields_to_normalize, normalizer);
    let normalized = engine.search(query, &candidates, params);

    merge_ranked(previous, normalized)
}

/// Convenience wrapper: run both passes and merge.
///
/// Callers that already hold an original-text result (for example, one
/// computed before deciding whether the folded pass is worth the cost)
/// should use [`merge_with_normalized_matches`] instead.
pub fn search_and_merge<E: MatchEngine, N: Normalizer>(
    engine: &E,
    normalizer: &N,
    records: &[Record],
    fields_to_normalize: &[String],
    query: &str,
    params: &SearchParams,
) -> Vec<Match> {
    let original = {
        let candidates = crate::project::original_candidates(records, fields_to_normalize);
        engine.search(query, &candidates, params)
    };
    merge_with_normalized_matches(
        engine,
        normalizer,
        records,
        fields_to_normalize,
        query,
        original,
        params,
    )
}
