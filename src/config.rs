//! Configuration system using TOML files.
//!
//! Config is read from the OS-standard config directory unless a path is
//! given on the command line:
//! - Windows: %APPDATA%\seekr\config.toml
//! - macOS: ~/Library/Application Support/seekr/config.toml
//! - Linux: ~/.config/seekr/config.toml
//!
//! Every setting has a default, and command-line flags override the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default minimum similarity for a match.
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Matching settings
    pub matching: MatchingConfig,

    /// Where the two corpora live
    pub library: LibraryConfig,

    /// Output file settings
    pub report: ReportConfig,
}

/// Matching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum similarity (0-100) for a candidate to count as a match
    pub threshold: u8,

    /// Match items on all cores
    pub parallel: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            parallel: false,
        }
    }
}

/// Corpus locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Library SQLite database
    pub database: Option<PathBuf>,

    /// Folder tree to search for audio files
    pub search_root: Option<PathBuf>,
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory for download lists and JSON reports
    pub directory: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.matching.threshold > 100 {
            return Err(Error::config(format!(
                "matching.threshold must be between 0 and 100, got {}",
                self.matching.threshold
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("seekr"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration.
///
/// With an explicit path, a missing or invalid file is an error. Without
/// one, the default location is tried and any problem there falls back to
/// defaults with a log message.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {e}", path.display())))?;
        let config = Config::from_toml(&contents)
            .map_err(|e| e.context(format!("in {}", path.display())))?;
        tracing::info!("Loaded config from {:?}", path);
        return Ok(config);
    }

    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Ok(Config::default());
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match Config::from_toml(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                Ok(config)
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Ok(Config::default())
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Ok(Config::default())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
