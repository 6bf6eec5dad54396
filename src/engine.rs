// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The fuzzy match engine seam, and a built-in engine to fill it.
//!
//! The merge pipeline treats the engine as an opaque scoring primitive: give
//! it a query, a set of candidates, and the weighted field keys; get back a
//! ranked, deduplicated, truncated match set. [`MatchEngine`] is that
//! contract. Production callers can wrap whatever matcher they already run.
//!
//! [`TieredEngine`] is the in-house default. Per term, per field, it tries
//! three tiers in order of quality (exact word, substring, bounded
//! Levenshtein) and keeps the best hit. Matched terms accumulate per field;
//! a field where no term matches at all yields no sub-score and is left to
//! the sentinel penalty in `scoring`.

use crate::fuzzy::bounded_distance;
use crate::normalize::fold;
use crate::project::Candidate;
use crate::scoring::{
    composite, EXACT_WORD_SCORE, FUZZY_DISTANCE_1_SCORE, FUZZY_DISTANCE_2_SCORE, SUBSTRING_SCORE,
    TERM_LENGTH_PENALTY,
};
use crate::types::{Match, SearchParams, SubScore};
use tracing::debug;

/// A ranked fuzzy matcher over a candidate collection.
///
/// # Contract
///
/// The returned set is sorted descending by composite score, truncated to
/// `params.limit`, contains each record id at most once, and every match's
/// `field_scores` aligns index-for-index with `params.weights`. Candidates
/// with unique record ids are a precondition.
pub trait MatchEngine {
    fn search(&self, query: &str, candidates: &[Candidate<'_>], params: &SearchParams)
        -> Vec<Match>;
}

/// Parse a query string into folded, whitespace-separated terms.
fn parse_query(query: &str) -> Vec<String> {
    fold(query)
        .split(' ')
        .filter(|p| !p.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// The built-in three-tier fuzzy engine.
///
/// Tier order per term: exact word (100) → substring (50) → Levenshtein
/// within distance 1 (30) or 2 (15), with a small length penalty so shorter
/// matched words win ties. Edit distance 1 is allowed for short terms,
/// 2 for terms longer than five characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredEngine;

impl TieredEngine {
    /// Best tier score for one query term against one word of field text.
    fn term_score(term: &str, word: &str) -> Option<f64> {
        let word_len = word.chars().count();
        let penalty = word_len as f64 * TERM_LENGTH_PENALTY;

        if word == term {
            return Some(EXACT_WORD_SCORE);
        }
        if word.contains(term) {
            return Some(SUBSTRING_SCORE - penalty);
        }

        // Use edit distance 1 for short terms, 2 for longer terms
        let max_dist = if term.chars().count() > 5 { 2 } else { 1 };
        match bounded_distance(term, word, max_dist) {
            Some(1) => Some(FUZZY_DISTANCE_1_SCORE - penalty),
            Some(2) => Some(FUZZY_DISTANCE_2_SCORE - penalty),
            _ => None,
        }
    }

    /// Score one field's text against all query terms.
    ///
    /// Each term contributes the score of its best-matching word; terms that
    /// match nowhere in the field contribute nothing. A field where *no* term
    /// matches produces no sub-score at all; that is what the sentinel
    /// penalty in `scoring` is for. Queries routinely span fields ("tokyo"
    /// for the name, "japan" for the country), so a field is not required to
    /// match every term.
    ///
    /// Field text is only *case*-folded here. Script folding is the
    /// projector's job; doing it in the engine would erase the difference
    /// between the original-text and folded-text passes.
    fn field_score(terms: &[String], text: &str) -> Option<f64> {
        let folded = text.to_lowercase();
        let words: Vec<&str> = folded.split_whitespace().collect();
        if words.is_empty() {
            return None;
        }

        let mut total = None;
        for term in terms {
            let best = words
                .iter()
                .filter_map(|word| Self::term_score(term, word))
                .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |a| a.max(s))));
            if let Some(best) = best {
                total = Some(total.unwrap_or(0.0) + best);
            }
        }
        total
    }
}

impl MatchEngine for TieredEngine {
    fn search(
        &self,
        query: &str,
        candidates: &[Candidate<'_>],
        params: &SearchParams,
    ) -> Vec<Match> {
        let terms = parse_query(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<Match> = Vec::new();
        for candidate in candidates {
            let field_scores: Vec<SubScore> = params
                .weights
                .iter()
                .map(|fw| {
                    candidate
                        .fields
                        .get(&fw.field)
                        .and_then(|text| Self::field_score(&terms, text))
                        .into()
                })
                .collect();

            // No field matched at all: not a candidate, not even a penalized one.
            if field_scores.iter().all(|s| s.value().is_none()) {
                continue;
            }

            let score = composite(&field_scores, &params.weights);
            if score < params.threshold {
                continue;
            }

            matches.push(Match {
                record: candidate.record.clone(),
                score,
                field_scores,
            });
        }

        // Stable sort by score descending, record id as tiebreaker for
        // determinism across runs.
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id().cmp(&b.id()))
        });
        matches.truncate(params.limit);

        debug!(
            query,
            candidates = candidates.len(),
            matched = matches.len(),
            "engine pass complete"
        );
        matches
    }
}
