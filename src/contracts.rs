//! Runtime contracts for the merge pipeline's preconditions.
//!
//! The merger has no failure modes of its own: it performs no I/O and every
//! anomaly it could meet is a caller bug (duplicate ids inside one input,
//! unsorted inputs, weight lists that don't line up with sub-score vectors).
//! Those are precondition violations, not recoverable errors, so they are
//! checked with `debug_assert!`:
//!
//! 1. **Zero-cost in release builds**: the merge path stays branch-free
//! 2. **Early failure detection** during development and in tests
//!
//! Integration tests call these directly (they always execute there) to
//! assert the documented postconditions of engine passes and merges.

use crate::types::{Match, SearchParams};
use std::collections::HashSet;

/// Check that a match set satisfies the ranked-set invariant: sorted
/// descending by score, record ids unique.
///
/// # Panics (debug builds only)
#[inline]
pub fn check_ranked(matches: &[Match]) {
    debug_assert!(
        matches.windows(2).all(|w| w[0].score >= w[1].score),
        "ranked set not sorted descending by score"
    );
    debug_assert!(
        {
            let mut seen = HashSet::new();
            matches.iter().all(|m| seen.insert(m.id()))
        },
        "ranked set contains duplicate record ids"
    );
}

/// Check that a previously computed result aligns with the configuration it
/// is about to be merged under: every sub-score vector must have one slot per
/// configured weight.
///
/// Field *order* cannot be verified from the data alone - a caller mixing
/// two configurations with equal lengths gets silently garbage scores, which
/// is exactly why this is documented as undefined behavior.
///
/// # Panics (debug builds only)
#[inline]
pub fn check_same_weight_order(previous: &[Match], params: &SearchParams) {
    debug_assert!(
        previous
            .iter()
            .all(|m| m.field_scores.len() == params.weights.len()),
        "previous result's sub-score vectors misaligned with configured weights"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::score_only_match;
    use crate::types::{FieldWeight, SubScore};

    #[test]
    fn well_formed_sets_pass() {
        check_ranked(&[]);
        check_ranked(&[score_only_match(1, 5.0), score_only_match(2, 5.0)]);

        let mut m = score_only_match(1, 5.0);
        m.field_scores = vec![SubScore::Missing];
        check_same_weight_order(
            &[m],
            &SearchParams::new(vec![FieldWeight::new("name", 1.0)]),
        );
    }

    #[test]
    #[should_panic(expected = "sorted descending")]
    #[cfg(debug_assertions)]
    fn unsorted_set_panics() {
        check_ranked(&[score_only_match(1, 1.0), score_only_match(2, 2.0)]);
    }

    #[test]
    #[should_panic(expected = "duplicate record ids")]
    #[cfg(debug_assertions)]
    fn duplicate_ids_panic() {
        check_ranked(&[score_only_match(1, 2.0), score_only_match(1, 1.0)]);
    }

    #[test]
    #[should_panic(expected = "misaligned")]
    #[cfg(debug_assertions)]
    fn misaligned_weight_list_panics() {
        let mut m = score_only_match(1, 5.0);
        m.field_scores = vec![SubScore::Scored(3.0)];
        check_same_weight_order(
            &[m],
            &SearchParams::new(vec![
                FieldWeight::new("name", 2.0),
                FieldWeight::new("city", 1.0),
            ]),
        );
    }
}
