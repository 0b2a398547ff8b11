//! Fuzzy matching engine.
//!
//! - [`normalize`]: text canonicalization and artist tokenization
//! - [`similarity`]: the [`SimilarityScorer`] trait and its token-set default
//! - [`database`]: matching against library database records
//! - [`filesystem`]: matching against files under a search root
//!
//! Scanners return hits sorted by score, highest first. Equal scores keep
//! the order in which their candidates were encountered.

pub mod database;
pub mod filesystem;
pub mod normalize;
pub mod similarity;

pub use database::{DatabaseIndex, scan_database};
pub use filesystem::{FileIndex, scan_filesystem};
pub use normalize::{normalize, split_artists};
pub use similarity::{SimilarityScorer, TokenSetScorer};

use crate::model::MatchHit;

/// Best score over every (query artist, candidate artist) pair, 0 if there
/// are no pairs.
pub(crate) fn best_pair_score(
    query_artists: &[String],
    candidate_artists: &[String],
    score: impl Fn(&str, &str) -> u8,
) -> u8 {
    query_artists
        .iter()
        .flat_map(|qa| candidate_artists.iter().map(move |ca| (qa, ca)))
        .map(|(qa, ca)| score(qa, ca))
        .max()
        .unwrap_or(0)
}

/// Highest score first; `sort_by` is stable so ties keep encounter order.
pub(crate) fn sort_hits(hits: &mut [MatchHit]) {
    hits.sort_by(|a, b| b.score.cmp(&a.score));
}
