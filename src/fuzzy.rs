// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance with an early-exit optimization.
//!
//! The key insight: `|len(a) - len(b)|` is a lower bound on edit distance.
//! If two strings differ in length by more than the threshold, skip the O(nm)
//! DP. This catches most non-matches before allocating anything.

/// Bounded Levenshtein distance.
///
/// Returns `Some(distance)` when the strings are within `max` edits of each
/// other, `None` otherwise. Two early-exit paths:
///
/// 1. If length difference exceeds `max`, return `None` immediately
/// 2. If the minimum row value exceeds `max`, abandon the DP early
///
/// Operates on characters, not bytes, for Unicode correctness.
pub fn bounded_distance(a: &str, b: &str, max: usize) -> Option<usize> {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    // Early-exit: length difference is a lower bound on edit distance
    if (a_len as isize - b_len as isize).unsigned_abs() > max {
        return None;
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, bc) in b.chars().enumerate() {
            let temp = dp[j + 1];
            let cost = if ac == bc { 0 } else { 1 };
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            if dp[j + 1] < min_row {
                min_row = dp[j + 1];
            }
        }

        // Early-exit: if minimum in this row exceeds max, no point continuing
        if min_row > max {
            return None;
        }
    }

    if dp[b_len] <= max {
        Some(dp[b_len])
    } else {
        None
    }
}

/// Are these strings within `max` edits of each other?
#[inline]
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    bounded_distance(a, b, max).is_some()
}
