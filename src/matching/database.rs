//! Matching queries against library database records.

use tracing::trace;

use super::normalize::{normalize, split_artists};
use super::similarity::SimilarityScorer;
use super::{best_pair_score, sort_hits};
use crate::model::{DatabaseRecord, MatchHit, Query};

/// A record with its comparison forms worked out once.
#[derive(Debug, Clone)]
struct IndexedRecord {
    title: String,
    artists: Vec<String>,
    label: String,
}

/// The database corpus, normalized and ready to scan.
///
/// Built once per run; [`DatabaseIndex::scan`] is a pure function of the
/// index and its arguments.
#[derive(Debug, Clone, Default)]
pub struct DatabaseIndex {
    records: Vec<IndexedRecord>,
}

impl DatabaseIndex {
    pub fn new(records: &[DatabaseRecord]) -> Self {
        let records = records
            .iter()
            .map(|record| IndexedRecord {
                title: normalize(&record.title),
                artists: split_artists(&normalize(record.artist_name())),
                label: record.label(),
            })
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records scoring at least `threshold`, best first.
    ///
    /// With both title and artist, each query artist is paired with each
    /// record artist as `"{title}::{artist}"` and the best pair counts.
    /// Title-only compares titles; artist-only takes the best artist pair.
    pub fn scan(&self, query: &Query, threshold: u8, scorer: &dyn SimilarityScorer) -> Vec<MatchHit> {
        if query.is_empty() {
            return Vec::new();
        }

        let query_artists = split_artists(&query.artist);
        let mut hits = Vec::new();

        for record in &self.records {
            let score = if !query.title.is_empty() && !query.artist.is_empty() {
                best_pair_score(&query_artists, &record.artists, |qa, da| {
                    scorer.score(
                        &format!("{}::{}", query.title, qa),
                        &format!("{}::{}", record.title, da),
                    )
                })
            } else if !query.title.is_empty() {
                scorer.score(&query.title, &record.title)
            } else {
                best_pair_score(&query_artists, &record.artists, |qa, da| scorer.score(qa, da))
            };

            if score >= threshold {
                trace!(target: "seekr::matching", label = %record.label, score, "database hit");
                hits.push(MatchHit {
                    score,
                    label: record.label.clone(),
                    path: None,
                });
            }
        }

        sort_hits(&mut hits);
        hits
    }
}

/// One-shot database scan over raw records.
pub fn scan_database(
    records: &[DatabaseRecord],
    query: &Query,
    threshold: u8,
    scorer: &dyn SimilarityScorer,
) -> Vec<MatchHit> {
    DatabaseIndex::new(records).scan(query, threshold, scorer)
}
