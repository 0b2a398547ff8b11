//! Application-wide error types.
//!
//! Library modules return [`Error`] via the [`Result`] alias, while the
//! CLI layer uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - Normalization, tokenization and scoring never fail.
//! - A bad filesystem root is a configuration error ([`Error::InvalidRoot`]),
//!   not an empty match list.
//! - Corpus loading errors abort the run before any scanning starts.
//!
//! # Example
//!
//! ```ignore
//! use seekr::error::{Error, Result};
//!
//! fn index(root: &Path) -> Result<FileIndex> {
//!     let index = FileIndex::build(root)?; // InvalidRoot propagates
//!     Ok(index)
//! }
//! ```

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Library database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Search root missing or not a directory
    #[error("Search root is not a directory: {0}")]
    InvalidRoot(PathBuf),

    /// Unreadable or malformed query list
    #[error("Input error for {path}: {message}")]
    Input { path: PathBuf, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an input error.
    pub fn input(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid root error.
    pub fn invalid_root(path: impl Into<PathBuf>) -> Self {
        Self::InvalidRoot(path.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Database(e).context(ctx))
    }
}
