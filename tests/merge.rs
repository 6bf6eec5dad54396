//! Integration and property tests for the merge-and-rerank pipeline.
//!
//! The unit tests in `src/merge.rs` pin the worked examples; these tests
//! verify the documented postconditions hold for arbitrary well-formed
//! inputs and for full two-pass searches through the built-in engine.

use proptest::prelude::*;
use scriptfold::contracts::check_ranked;
use scriptfold::testing::{make_record, name_city_params, score_only_match};
use scriptfold::{
    merge_ranked, search_and_merge, Match, RecordId, ScriptFolder, TieredEngine,
};
use std::collections::{BTreeMap, HashSet};

// =============================================================================
// PROPERTY TESTS
// =============================================================================

/// A well-formed ranked set: unique ids, sorted descending by score.
fn ranked_set_strategy() -> impl Strategy<Value = Vec<Match>> {
    prop::collection::btree_map(0u32..40, 0.0f64..200.0, 0..25).prop_map(|by_id| {
        let mut set: Vec<Match> = by_id
            .into_iter()
            .map(|(id, score)| score_only_match(id, score))
            .collect();
        set.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        set
    })
}

fn ids(matches: &[Match]) -> HashSet<RecordId> {
    matches.iter().map(Match::id).collect()
}

proptest! {
    /// Completeness: every id from either input appears in the output.
    #[test]
    fn prop_merge_is_complete(
        original in ranked_set_strategy(),
        normalized in ranked_set_strategy(),
    ) {
        let expected: HashSet<RecordId> =
            ids(&original).union(&ids(&normalized)).copied().collect();
        let merged = merge_ranked(original, normalized);
        prop_assert_eq!(ids(&merged), expected);
    }

    /// No duplication: each id at most once.
    #[test]
    fn prop_merge_never_duplicates(
        original in ranked_set_strategy(),
        normalized in ranked_set_strategy(),
    ) {
        let merged = merge_ranked(original, normalized);
        let unique: HashSet<RecordId> = ids(&merged);
        prop_assert_eq!(unique.len(), merged.len());
    }

    /// Monotonic dominance: a record in both inputs keeps the higher score.
    #[test]
    fn prop_merge_keeps_max_score(
        original in ranked_set_strategy(),
        normalized in ranked_set_strategy(),
    ) {
        let orig_scores: BTreeMap<RecordId, f64> =
            original.iter().map(|m| (m.id(), m.score)).collect();
        let norm_scores: BTreeMap<RecordId, f64> =
            normalized.iter().map(|m| (m.id(), m.score)).collect();

        let merged = merge_ranked(original, normalized);
        for m in &merged {
            let expected = match (orig_scores.get(&m.id()), norm_scores.get(&m.id())) {
                (Some(o), Some(n)) => o.max(*n),
                (Some(o), None) => *o,
                (None, Some(n)) => *n,
                (None, None) => unreachable!("merged id missing from both inputs"),
            };
            prop_assert!(
                (m.score - expected).abs() < 1e-12,
                "id {:?}: expected {}, got {}",
                m.id(), expected, m.score
            );
        }
    }

    /// Sort invariant: adjacent pairs are non-increasing.
    #[test]
    fn prop_merge_sorted_descending(
        original in ranked_set_strategy(),
        normalized in ranked_set_strategy(),
    ) {
        let merged = merge_ranked(original, normalized);
        for pair in merged.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        check_ranked(&merged);
    }

    /// No-op idempotence: an empty folded pass returns the previous result
    /// unchanged in order and content.
    #[test]
    fn prop_merge_with_empty_is_identity(original in ranked_set_strategy()) {
        let merged = merge_ranked(original.clone(), Vec::new());
        prop_assert_eq!(merged, original);
    }
}

// =============================================================================
// END-TO-END: TWO PASSES THROUGH THE BUILT-IN ENGINE
// =============================================================================

#[cfg(feature = "unicode-normalization")]
#[test]
fn folded_pass_rescues_cross_script_queries() {
    use scriptfold::{merge_with_normalized_matches, original_candidates, MatchEngine};

    let records = vec![
        make_record(0, "Tōkyō", "Japan"),
        make_record(1, "Toronto", "Canada"),
        make_record(2, "Tokio Hotel", "Germany"),
    ];
    let params = name_city_params();
    let fields: Vec<String> = vec!["name".into(), "city".into()];

    // The original pass cannot see through the macrons...
    let previous = {
        let candidates = original_candidates(&records, &fields);
        TieredEngine.search("tokyo", &candidates, &params)
    };
    assert!(!previous.iter().any(|m| m.id() == RecordId(0) && m.score > 0.0));

    // ...the merged result can.
    let merged = merge_with_normalized_matches(
        &TieredEngine,
        &ScriptFolder,
        &records,
        &fields,
        "tokyo",
        previous,
        &params,
    );
    check_ranked(&merged);
    assert_eq!(merged[0].id(), RecordId(0), "folded exact match should lead");
}

#[cfg(feature = "unicode-normalization")]
#[test]
fn original_match_survives_when_folding_adds_nothing() {
    use scriptfold::{merge_with_normalized_matches, original_candidates, MatchEngine};

    // Plain ASCII records: both passes see identical text, so every folded
    // match ties its counterpart and the result set is unchanged in shape.
    let records = vec![
        make_record(0, "lisbon", "portugal"),
        make_record(1, "london", "england"),
    ];
    let params = name_city_params();
    let fields: Vec<String> = vec!["name".into(), "city".into()];

    let previous = {
        let candidates = original_candidates(&records, &fields);
        TieredEngine.search("lisbon portugal", &candidates, &params)
    };
    let expected: Vec<(RecordId, f64)> = previous.iter().map(|m| (m.id(), m.score)).collect();

    let merged = merge_with_normalized_matches(
        &TieredEngine,
        &ScriptFolder,
        &records,
        &fields,
        "lisbon portugal",
        previous,
        &params,
    );
    let got: Vec<(RecordId, f64)> = merged.iter().map(|m| (m.id(), m.score)).collect();
    assert_eq!(got, expected);
}

#[test]
fn search_and_merge_end_to_end() {
    let records = vec![
        make_record(0, "Ōsaka", "Japan"),
        make_record(1, "Oslo", "Norway"),
    ];
    let params = name_city_params();
    let fields: Vec<String> = vec!["name".into(), "city".into()];

    let merged = search_and_merge(
        &TieredEngine,
        &ScriptFolder,
        &records,
        &fields,
        "osaka japan",
        &params,
    );
    check_ranked(&merged);
    assert!(!merged.is_empty());
    assert_eq!(merged[0].id(), RecordId(0));
}

#[test]
fn spec_examples_hold() {
    // original = [{id:1, s:10}, {id:2, s:5}], normalized = [{id:1, s:15}, {id:3, s:8}]
    let merged = merge_ranked(
        vec![score_only_match(1, 10.0), score_only_match(2, 5.0)],
        vec![score_only_match(1, 15.0), score_only_match(3, 8.0)],
    );
    let got: Vec<(u32, f64)> = merged.iter().map(|m| (m.id().get(), m.score)).collect();
    assert_eq!(got, vec![(1, 15.0), (3, 8.0), (2, 5.0)]);

    // original = [], normalized = [{id:5, s:3}]
    let merged = merge_ranked(Vec::new(), vec![score_only_match(5, 3.0)]);
    let got: Vec<(u32, f64)> = merged.iter().map(|m| (m.id().get(), m.score)).collect();
    assert_eq!(got, vec![(5, 3.0)]);

    // Tie: the folded match's content wins.
    let merged = merge_ranked(
        vec![score_only_match(1, 10.0)],
        vec![score_only_match(1, 10.0)],
    );
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].score, 10.0);
}
