//! seekr - find which wanted tracks you already own.
//!
//! Given a list of title/artist pairs, seekr fuzzy-matches each one against
//! a music library database and a folder tree of audio files, and sorts
//! every item into one of three buckets: in the database, on disk only, or
//! missing.
//!
//! # Architecture
//!
//! - `matching`: normalization, artist splitting, scoring and both scanners
//! - `scanner`: filesystem traversal
//! - `reconcile`: runs the scanners per item and classifies the results
//! - `db`: read-only loading of the library database
//! - `input`: loading the wanted-tracks list
//! - `report`: console, CSV and JSON output
//! - `cli`: command-line interface

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod input;
pub mod matching;
pub mod model;
pub mod reconcile;
pub mod report;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

pub use error::{Error, Result};
pub use matching::{SimilarityScorer, TokenSetScorer};
pub use model::{Bucket, ItemResult, MatchHit, Query, Reconciliation, Summary};
pub use reconcile::Reconciler;
