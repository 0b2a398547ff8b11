//! Core data models for reconciliation.
//!
//! Defines the values that flow through the matching engine: the
//! [`Query`] being looked for, the two corpus item types
//! ([`DatabaseRecord`], [`FileEntry`]) and the results
//! ([`MatchHit`], [`ItemResult`], [`Summary`]).
//!
//! All of these are plain immutable values once built. Hit lists are kept
//! sorted by score, highest first.

use serde::Serialize;
use std::path::PathBuf;

/// A wanted track, with both fields already normalized.
///
/// Either field may be empty, but rows where both are empty are dropped
/// by the input loader before they get here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    pub title: String,
    pub artist: String,
}

impl Query {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// True when there is nothing to match on.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.artist.is_empty()
    }

    /// Display term, e.g. "deadmau5 - strobe", or just the non-empty half.
    pub fn term(&self) -> String {
        format!("{} - {}", self.artist, self.title)
            .trim_matches(|c| c == ' ' || c == '-')
            .to_string()
    }
}

/// Artist reference attached to a library track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRef {
    pub name: String,
}

/// A track in the library database, as handed to the database scanner.
///
/// Fields hold the original, non-normalized text; normalization happens
/// inside the scanner so hit labels can show what the library shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseRecord {
    pub title: String,
    pub artist: Option<ArtistRef>,
}

impl DatabaseRecord {
    pub fn new(title: impl Into<String>, artist: Option<&str>) -> Self {
        Self {
            title: title.into(),
            artist: artist.map(|name| ArtistRef {
                name: name.to_string(),
            }),
        }
    }

    /// Artist name, or "" when the track has no artist.
    pub fn artist_name(&self) -> &str {
        self.artist.as_ref().map(|a| a.name.as_str()).unwrap_or("")
    }

    /// Hit label: "{artist} - {title}" using the raw fields.
    pub fn label(&self) -> String {
        format!("{} - {}", self.artist_name(), self.title)
    }
}

/// A regular file found under a search root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name without extension
    pub stem: String,
    /// File name with extension
    pub file_name: String,
    /// Ancestor folder names between the root and the file, outermost first
    pub directory_parts: Vec<String>,
    /// Canonical absolute path
    pub canonical: PathBuf,
}

/// One candidate that cleared the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchHit {
    /// Similarity in 0..=100
    pub score: u8,
    /// "{artist} - {title}" for database hits, file name for filesystem hits
    pub label: String,
    /// Canonical path, filesystem hits only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Classification outcome for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    MatchedInDatabase,
    MatchedOnFilesystem,
    Unmatched,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MatchedInDatabase => "match in db",
            Self::MatchedOnFilesystem => "match on fs",
            Self::Unmatched => "no match",
        }
    }
}

/// Both hit lists for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemResult {
    pub query: Query,
    pub database_hits: Vec<MatchHit>,
    pub filesystem_hits: Vec<MatchHit>,
}

impl ItemResult {
    pub fn database_count(&self) -> usize {
        self.database_hits.len()
    }

    pub fn filesystem_count(&self) -> usize {
        self.filesystem_hits.len()
    }

    /// Database hits win over filesystem hits.
    pub fn bucket(&self) -> Bucket {
        if !self.database_hits.is_empty() {
            Bucket::MatchedInDatabase
        } else if !self.filesystem_hits.is_empty() {
            Bucket::MatchedOnFilesystem
        } else {
            Bucket::Unmatched
        }
    }
}

/// Item counts per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub matched_in_database: usize,
    pub matched_on_filesystem: usize,
    pub unmatched: usize,
}

impl Summary {
    pub fn from_items(items: &[ItemResult]) -> Self {
        items.iter().fold(Self::default(), |mut summary, item| {
            match item.bucket() {
                Bucket::MatchedInDatabase => summary.matched_in_database += 1,
                Bucket::MatchedOnFilesystem => summary.matched_on_filesystem += 1,
                Bucket::Unmatched => summary.unmatched += 1,
            }
            summary
        })
    }

    pub fn count(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::MatchedInDatabase => self.matched_in_database,
            Bucket::MatchedOnFilesystem => self.matched_on_filesystem,
            Bucket::Unmatched => self.unmatched,
        }
    }

    pub fn total(&self) -> usize {
        self.matched_in_database + self.matched_on_filesystem + self.unmatched
    }
}

/// Everything a run produces, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Reconciliation {
    pub items: Vec<ItemResult>,
    pub summary: Summary,
}

impl Reconciliation {
    pub fn new(items: Vec<ItemResult>) -> Self {
        let summary = Summary::from_items(&items);
        Self { items, summary }
    }

    /// Items that fell in the given bucket, in input order.
    pub fn in_bucket(&self, bucket: Bucket) -> impl Iterator<Item = &ItemResult> {
        self.items.iter().filter(move |item| item.bucket() == bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(score: u8) -> MatchHit {
        MatchHit {
            score,
            label: "x".to_string(),
            path: None,
        }
    }

    fn item(db: usize, fs: usize) -> ItemResult {
        ItemResult {
            query: Query::new("title", "artist"),
            database_hits: (0..db).map(|_| hit(90)).collect(),
            filesystem_hits: (0..fs).map(|_| hit(90)).collect(),
        }
    }

    #[test]
    fn test_bucket_priority() {
        assert_eq!(item(1, 0).bucket(), Bucket::MatchedInDatabase);
        assert_eq!(item(2, 3).bucket(), Bucket::MatchedInDatabase);
        assert_eq!(item(0, 1).bucket(), Bucket::MatchedOnFilesystem);
        assert_eq!(item(0, 0).bucket(), Bucket::Unmatched);
    }

    #[test]
    fn test_summary_is_exhaustive() {
        let items = vec![item(1, 1), item(0, 2), item(0, 0), item(0, 0)];
        let summary = Summary::from_items(&items);
        assert_eq!(summary.matched_in_database, 1);
        assert_eq!(summary.matched_on_filesystem, 1);
        assert_eq!(summary.unmatched, 2);
        assert_eq!(summary.total(), items.len());
    }

    #[test]
    fn test_query_term() {
        assert_eq!(Query::new("strobe", "deadmau5").term(), "deadmau5 - strobe");
        assert_eq!(Query::new("strobe", "").term(), "strobe");
        assert_eq!(Query::new("", "deadmau5").term(), "deadmau5");
    }

    #[test]
    fn test_record_label_uses_raw_fields() {
        let record = DatabaseRecord::new("Strobe (Original Mix)", Some("Deadmau5"));
        assert_eq!(record.label(), "Deadmau5 - Strobe (Original Mix)");

        let orphan = DatabaseRecord::new("Untitled", None);
        assert_eq!(orphan.artist_name(), "");
        assert_eq!(orphan.label(), " - Untitled");
    }
}
