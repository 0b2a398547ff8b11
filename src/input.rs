//! Loading the wanted-tracks list.
//!
//! The input is a JSON array of `{"title": ..., "artist": ...}` objects.
//! Either field may be missing or null. Rows are normalized here, and rows
//! with nothing left to match on are dropped before matching.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::matching::normalize;
use crate::model::Query;

/// One row as written in the input file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuery {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
}

/// Normalize rows into queries, skipping rows where both fields end up empty.
pub fn prepare(rows: Vec<RawQuery>) -> Vec<Query> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            let title = normalize(row.title.unwrap_or_default().trim());
            let artist = normalize(row.artist.unwrap_or_default().trim());
            let query = Query::new(title, artist);
            if query.is_empty() {
                debug!(target: "seekr::input", row = idx, "Skipping empty input row");
                None
            } else {
                Some(query)
            }
        })
        .collect()
}

/// Parse a JSON query list from a string.
pub fn parse(json: &str) -> serde_json::Result<Vec<RawQuery>> {
    serde_json::from_str(json)
}

/// Read, parse and prepare the query list at `path`.
///
/// # Errors
///
/// [`Error::Input`] if the file cannot be read or is not a JSON array of
/// title/artist objects.
pub fn load_queries(path: &Path) -> Result<Vec<Query>> {
    let json = std::fs::read_to_string(path).map_err(|e| Error::input(path, e.to_string()))?;
    let rows = parse(&json).map_err(|e| Error::input(path, e.to_string()))?;
    let total = rows.len();
    let queries = prepare(rows);
    debug!(target: "seekr::input", path = %path.display(), rows = total, queries = queries.len(), "Input loaded");
    Ok(queries)
}
