//! Command-line interface for seekr.
//!
//! This module provides the `seek` reconciliation command plus small
//! helpers for inspecting normalization and configuration.

mod commands;

pub use commands::{Cli, run_command};
