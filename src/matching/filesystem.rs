//! Matching queries against files under a search root.
//!
//! The file stem is the title candidate; every folder between the root and
//! the file is an artist candidate. Unlike the database scanner, a query
//! with both title and artist needs *both* to clear the threshold.

use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, trace};

use super::normalize::{normalize, split_artists};
use super::similarity::SimilarityScorer;
use super::{best_pair_score, sort_hits};
use crate::error::Result;
use crate::model::{FileEntry, MatchHit, Query};
use crate::scanner;

/// A file with its comparison forms worked out once.
#[derive(Debug, Clone)]
struct IndexedFile {
    entry: FileEntry,
    title: String,
    /// Artist tokens from every ancestor folder, outermost first
    artists: Vec<String>,
}

impl IndexedFile {
    fn new(entry: FileEntry) -> Self {
        let title = normalize(&entry.stem);
        let artists = entry
            .directory_parts
            .iter()
            .flat_map(|dir| split_artists(&normalize(dir)))
            .collect();
        Self {
            entry,
            title,
            artists,
        }
    }
}

/// The files under a search root, normalized and ready to scan.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    files: Vec<IndexedFile>,
}

impl FileIndex {
    /// Walks `root` once and indexes every regular file.
    ///
    /// # Errors
    ///
    /// [`crate::error::Error::InvalidRoot`] if `root` is missing or not a
    /// directory.
    pub fn build(root: &Path) -> Result<Self> {
        let index = Self::from_entries(scanner::walk(root)?);
        debug!(target: "seekr::matching", root = %root.display(), files = index.len(), "File index built");
        Ok(index)
    }

    pub fn from_entries(entries: Vec<FileEntry>) -> Self {
        Self {
            files: entries.into_iter().map(IndexedFile::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files scoring at least `threshold`, best first, one hit per
    /// canonical path.
    ///
    /// Title and artist: hit iff the stem score and the best folder score
    /// both reach the threshold; the hit scores the lower of the two.
    pub fn scan(&self, query: &Query, threshold: u8, scorer: &dyn SimilarityScorer) -> Vec<MatchHit> {
        if query.is_empty() {
            return Vec::new();
        }

        let query_artists = split_artists(&query.artist);
        let has_title = !query.title.is_empty();
        let has_artist = !query.artist.is_empty();

        let mut seen = HashSet::new();
        let mut hits = Vec::new();

        for file in &self.files {
            let title_score = || scorer.score(&query.title, &file.title);
            let artist_score =
                || best_pair_score(&file.artists, &query_artists, |da, qa| scorer.score(qa, da));

            let score = if has_title && has_artist {
                let t = title_score();
                let a = artist_score();
                (t >= threshold && a >= threshold).then(|| t.min(a))
            } else if has_title {
                Some(title_score()).filter(|t| *t >= threshold)
            } else {
                Some(artist_score()).filter(|a| *a >= threshold)
            };

            let Some(score) = score else { continue };

            if !seen.insert(&file.entry.canonical) {
                continue;
            }

            trace!(target: "seekr::matching", path = %file.entry.canonical.display(), score, "file hit");
            hits.push(MatchHit {
                score,
                label: file.entry.file_name.clone(),
                path: Some(file.entry.canonical.clone()),
            });
        }

        sort_hits(&mut hits);
        hits
    }
}

/// One-shot filesystem scan: walk `root`, then match.
pub fn scan_filesystem(
    root: &Path,
    query: &Query,
    threshold: u8,
    scorer: &dyn SimilarityScorer,
) -> Result<Vec<MatchHit>> {
    Ok(FileIndex::build(root)?.scan(query, threshold, scorer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::matching::TokenSetScorer;
    use crate::test_utils::touch;
    use tempfile::tempdir;

    #[test]
    fn test_title_and_artist_both_match() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "Artist X/Track Y.flac");

        let hits = scan_filesystem(
            dir.path(),
            &Query::new("track y", "artist x"),
            90,
            &TokenSetScorer,
        )
        .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, 100);
        assert_eq!(hits[0].label, "Track Y.flac");
        let path = hits[0].path.as_ref().unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("Artist X/Track Y.flac"));
    }

    #[test]
    fn test_and_semantics_rejects_wrong_folder() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "Artist Z/Track Y.flac");

        let query = Query::new("track y", "artist x");
        assert_eq!(TokenSetScorer.score("track y", "track y"), 100);
        assert!(TokenSetScorer.score("artist x", "artist z") < 90);

        let hits = scan_filesystem(dir.path(), &query, 90, &TokenSetScorer).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_combined_score_is_the_lower_one() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "artist/title.mp3");

        let scorer = |a: &str, b: &str| -> u8 {
            match (a, b) {
                ("title", "title") => 95,
                ("artist", "artist") => 85,
                _ => 0,
            }
        };
        let hits = scan_filesystem(dir.path(), &Query::new("title", "artist"), 80, &scorer).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, 85);
    }

    #[test]
    fn test_title_only_ignores_folders() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "Whoever/Strobe (Original Mix).mp3");
        touch(dir.path(), "Loose Strobe.wav");

        let hits = scan_filesystem(dir.path(), &Query::new("strobe", ""), 100, &TokenSetScorer).unwrap();
        let labels: Vec<&str> = hits.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["Loose Strobe.wav", "Strobe (Original Mix).mp3"]);
    }

    #[test]
    fn test_artist_only_checks_every_ancestor_folder() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "Electronic/Deadmau5 & Kaskade/Album/I Remember.flac");
        touch(dir.path(), "no folder match.flac");

        let hits = scan_filesystem(dir.path(), &Query::new("", "kaskade"), 100, &TokenSetScorer).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label, "I Remember.flac");
    }

    #[test]
    fn test_file_in_root_never_matches_an_artist() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "Track Y.flac");

        let hits = scan_filesystem(dir.path(), &Query::new("track y", "artist x"), 0, &TokenSetScorer).unwrap();
        // Artist score is 0 with no folders, which still clears a threshold of 0
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, 0);

        let hits = scan_filesystem(dir.path(), &Query::new("track y", "artist x"), 1, &TokenSetScorer).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_empty_query_yields_nothing() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a/b.mp3");

        let hits = scan_filesystem(dir.path(), &Query::new("", ""), 0, &TokenSetScorer).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_missing_root_is_an_error_not_empty() {
        let dir = tempdir().unwrap();
        let result = scan_filesystem(
            &dir.path().join("missing"),
            &Query::new("strobe", ""),
            80,
            &TokenSetScorer,
        );
        assert!(matches!(result, Err(Error::InvalidRoot(_))));
    }

    #[test]
    fn test_hits_sorted_by_score_then_traversal_order() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.mp3");
        touch(dir.path(), "b.mp3");
        touch(dir.path(), "c.mp3");

        let scorer = |_: &str, stem: &str| -> u8 { if stem == "b" { 90 } else { 80 } };
        let hits = scan_filesystem(dir.path(), &Query::new("x", ""), 80, &scorer).unwrap();
        let labels: Vec<&str> = hits.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["b.mp3", "a.mp3", "c.mp3"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_same_file_via_two_paths_is_one_hit() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "Artist X/Track Y.flac");
        std::os::unix::fs::symlink(dir.path().join("Artist X"), dir.path().join("Artist X Mirror"))
            .unwrap();

        let index = FileIndex::build(dir.path()).unwrap();
        assert_eq!(index.len(), 2);

        let hits = index.scan(&Query::new("track y", ""), 90, &TokenSetScorer);
        assert_eq!(hits.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_duplicate_path_counts_once_it_matches() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "Unknown/Track Y.flac");
        std::os::unix::fs::symlink(dir.path().join("Unknown"), dir.path().join("Artist X")).unwrap();

        // "Artist X" sorts first, so the matching path is seen first; the
        // "Unknown" path would fail the artist check anyway.
        let index = FileIndex::build(dir.path()).unwrap();
        let hits = index.scan(&Query::new("track y", "artist x"), 90, &TokenSetScorer);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, 100);
    }
}
