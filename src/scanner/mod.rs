//! Filesystem traversal for the search root.
//!
//! Walks a directory tree and describes every regular file as a
//! [`FileEntry`]. Only names and paths are looked at; file contents are
//! never opened.

use std::collections::HashSet;
use std::path::{Component, Path};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::model::FileEntry;

/// Recursively lists every regular file under `root`, any extension.
///
/// Symlinks are followed, so one file can show up more than once under
/// different paths; callers that need uniqueness use
/// [`FileEntry::canonical`]. Entries within a directory are visited in
/// file-name order. Unreadable entries are logged and skipped.
///
/// # Errors
///
/// [`Error::InvalidRoot`] if `root` does not exist or is not a directory.
pub fn walk(root: &Path) -> Result<Vec<FileEntry>> {
    if !root.is_dir() {
        return Err(Error::invalid_root(root));
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(target: "seekr::scanner", error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match describe(root, entry.path()) {
            Ok(file) => entries.push(file),
            Err(e) => {
                warn!(target: "seekr::scanner", path = %entry.path().display(), error = %e, "Skipping file");
            }
        }
    }

    let unique = entries
        .iter()
        .map(|e| &e.canonical)
        .collect::<HashSet<_>>()
        .len();
    debug!(target: "seekr::scanner", root = %root.display(), files = entries.len(), unique, "Walk complete");

    Ok(entries)
}

/// Splits a path under `root` into stem, name and ancestor folders.
fn describe(root: &Path, path: &Path) -> std::io::Result<FileEntry> {
    let canonical = std::fs::canonicalize(path)?;

    let relative = path.strip_prefix(root).unwrap_or(path);
    let directory_parts = relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|c| match c {
                    Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(FileEntry {
        stem: path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        file_name: path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        directory_parts,
        canonical,
    })
}
