//! Report files: CSV download list and JSON report.
//!
//! File names are prefixed with a local timestamp, e.g.
//! `20250101_120000_download-list.csv`.

use csv::{Terminator, WriterBuilder};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::{Bucket, ItemResult, MatchHit, Reconciliation};

/// Current local time as used in report file names.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Writes `{stamp}_download-list.csv` listing unmatched items.
///
/// Returns `None` without creating a file when nothing is unmatched.
pub fn write_download_list(result: &Reconciliation, dir: &Path, stamp: &str) -> Result<Option<PathBuf>> {
    let missing: Vec<&ItemResult> = result.in_bucket(Bucket::Unmatched).collect();
    if missing.is_empty() {
        return Ok(None);
    }

    let path = dir.join(format!("{stamp}_download-list.csv"));
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_path(&path)?;

    writer.write_record(["fetched", "artist", "title"])?;
    for item in missing {
        writer.write_record(["False", item.query.artist.as_str(), item.query.title.as_str()])?;
    }
    writer.flush()?;

    Ok(Some(path))
}

/// One item as written to the JSON report.
#[derive(Debug, Serialize)]
struct ReportEntry<'a> {
    artist: &'a str,
    title: &'a str,
    rb_count: usize,
    fs_count: usize,
    rb_items: Vec<ReportHit<'a>>,
    fs_items: Vec<ReportHit<'a>>,
}

#[derive(Debug, Serialize)]
struct ReportHit<'a> {
    score: u8,
    item: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

impl<'a> From<&'a MatchHit> for ReportHit<'a> {
    fn from(hit: &'a MatchHit) -> Self {
        Self {
            score: hit.score,
            item: &hit.label,
            path: hit.path.as_ref().map(|p| p.display().to_string()),
        }
    }
}

impl<'a> From<&'a ItemResult> for ReportEntry<'a> {
    fn from(item: &'a ItemResult) -> Self {
        Self {
            artist: &item.query.artist,
            title: &item.query.title,
            rb_count: item.database_count(),
            fs_count: item.filesystem_count(),
            rb_items: item.database_hits.iter().map(ReportHit::from).collect(),
            fs_items: item.filesystem_hits.iter().map(ReportHit::from).collect(),
        }
    }
}

/// Pretty-printed JSON array with one entry per item, in input order.
pub fn json_report(result: &Reconciliation) -> Result<String> {
    let entries: Vec<ReportEntry> = result.items.iter().map(ReportEntry::from).collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Writes `{stamp}_report.json`.
pub fn write_json_report(result: &Reconciliation, dir: &Path, stamp: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{stamp}_report.json"));
    std::fs::write(&path, json_report(result)?)?;
    Ok(path)
}
