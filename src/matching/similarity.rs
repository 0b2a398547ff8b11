//! Similarity scoring.
//!
//! Scanners never compare strings directly; they go through a
//! [`SimilarityScorer`] so the algorithm can be swapped and tested on its own.
//! The default is [`TokenSetScorer`].

use std::collections::BTreeSet;

/// A 0-100 similarity between two strings.
///
/// Implementations must be:
/// - symmetric: `score(a, b) == score(b, a)`
/// - reflexive: `score(a, a) == 100`
/// - word-order independent, with a subset phrase scoring near 100
///   against its superset
/// - `score("", "") == 100`: an empty artist is a deliberate wildcard
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, a: &str, b: &str) -> u8;
}

impl<F> SimilarityScorer for F
where
    F: Fn(&str, &str) -> u8 + Send + Sync,
{
    fn score(&self, a: &str, b: &str) -> u8 {
        self(a, b)
    }
}

/// Token-set ratio over whitespace-separated words.
///
/// Words shared by both sides form the common core; each side's leftovers
/// are appended to it and the three resulting strings are compared pairwise
/// with an insert/delete (Indel) ratio. The best pair wins. When one side's
/// words are all contained in the other's, the score is 100.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSetScorer;

impl SimilarityScorer for TokenSetScorer {
    fn score(&self, a: &str, b: &str) -> u8 {
        token_set_ratio(a, b)
    }
}

fn token_set_ratio(a: &str, b: &str) -> u8 {
    let words_a: BTreeSet<&str> = a.split_whitespace().collect();
    let words_b: BTreeSet<&str> = b.split_whitespace().collect();

    if words_a.is_empty() && words_b.is_empty() {
        return 100;
    }
    if words_a.is_empty() || words_b.is_empty() {
        return 0;
    }

    let common = join(words_a.intersection(&words_b));
    let only_a = join(words_a.difference(&words_b));
    let only_b = join(words_b.difference(&words_a));

    if !common.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100;
    }

    let with_a = append(&common, &only_a);
    let with_b = append(&common, &only_b);

    let mut best = ratio(&with_a, &with_b);
    if !common.is_empty() {
        best = best.max(ratio(&common, &with_a)).max(ratio(&common, &with_b));
    }
    best
}

/// Sorted words joined by single spaces
fn join<'a>(words: impl Iterator<Item = &'a &'a str>) -> String {
    words.copied().collect::<Vec<_>>().join(" ")
}

fn append(base: &str, rest: &str) -> String {
    match (base.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{base} {rest}"),
    }
}

/// Indel similarity: `1 - (len_a + len_b - 2 * lcs) / (len_a + len_b)`.
///
/// Only insertions and deletions count, so a substitution costs two edits
/// and appended characters cost one each.
fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }

    let distance = total - 2 * longest_common_subsequence(&a, &b);
    let similarity = 1.0 - distance as f64 / total as f64;
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Length of the longest common subsequence, one DP row at a time.
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for ca in a {
        let mut diagonal = 0;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings_score_100() {
        assert_eq!(TokenSetScorer.score("strobe", "strobe"), 100);
        assert_eq!(TokenSetScorer.score("strobe::deadmau5", "strobe::deadmau5"), 100);
    }

    #[test]
    fn test_word_order_does_not_matter() {
        assert_eq!(TokenSetScorer.score("above beyond", "beyond above"), 100);
    }

    #[test]
    fn test_subset_scores_100() {
        assert_eq!(TokenSetScorer.score("strobe", "strobe extended"), 100);
        assert_eq!(TokenSetScorer.score("track y", "01 track y"), 100);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(TokenSetScorer.score("", ""), 100);
        assert_eq!(TokenSetScorer.score("", "deadmau5"), 0);
        assert_eq!(TokenSetScorer.score("deadmau5", ""), 0);
    }

    #[test]
    fn test_unrelated_strings_score_low() {
        assert!(TokenSetScorer.score("strobe", "ghosts n stuff") < 50);
    }

    #[test]
    fn test_insertions_cost_one_edit() {
        assert_eq!(TokenSetScorer.score("remix", "remixes"), 83);
        assert_eq!(TokenSetScorer.score("artist x", "artist z"), 88);
        assert_eq!(TokenSetScorer.score("deadmau5", "deadmaus"), 88);
    }

    #[test]
    fn test_longest_common_subsequence() {
        let lcs = |a: &str, b: &str| {
            longest_common_subsequence(
                &a.chars().collect::<Vec<_>>(),
                &b.chars().collect::<Vec<_>>(),
            )
        };
        assert_eq!(lcs("remix", "remixes"), 5);
        assert_eq!(lcs("abcde", "ace"), 3);
        assert_eq!(lcs("", "abc"), 0);
        assert_eq!(lcs("strobe", "strobe"), 6);
    }

    #[test]
    fn test_close_spelling_scores_high() {
        let score = TokenSetScorer.score("deadmau5", "deadmaus");
        assert!(score >= 80, "got {score}");
    }

    #[test]
    fn test_closure_is_a_scorer() {
        let exact = |a: &str, b: &str| -> u8 { if a == b { 100 } else { 0 } };
        assert_eq!(exact.score("a", "a"), 100);
        assert_eq!(exact.score("a", "b"), 0);
    }
}
