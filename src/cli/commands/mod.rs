//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `seek`: the full reconciliation run
//! - `normalize`: shows how text is canonicalized, for checking rules
//! - `config`: shows the effective configuration

mod config;
mod normalize;
mod seek;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use config::cmd_config;
pub use normalize::cmd_normalize;
pub use seek::cmd_seek;

/// seekr: find which wanted tracks you already own
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Plain console output without colours
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file (default: seekr/config.toml in the OS config directory)
    #[arg(long, global = true, env = "SEEKR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Match a track list against the library database and a folder tree
    Seek(SeekArgs),
    /// Print normalized text and artist tokens
    Normalize {
        /// Text to normalize, one result per argument
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Print the effective configuration
    Config,
}

/// Arguments for `seek`
#[derive(Args, Debug, Clone)]
pub struct SeekArgs {
    /// JSON file with a list of {"title", "artist"} objects
    #[arg(short, long)]
    pub input: PathBuf,

    /// Root directory to search for audio files
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Library SQLite database
    #[arg(long, env = "SEEKR_DB")]
    pub db: Option<PathBuf>,

    /// Minimum similarity 0-100 (default: 80)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub score: Option<u8>,

    /// Detailed per-item output
    #[arg(short, long)]
    pub verbose: bool,

    /// Write a JSON report
    #[arg(long)]
    pub report: bool,

    /// Write a CSV download list of unmatched items
    #[arg(long)]
    pub dllist: bool,

    /// Directory for report files
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Match items in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = crate::config::load(cli.config.as_deref())?;
    if cli.no_color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Commands::Seek(args) => {
            let rt = Runtime::new()?;
            cmd_seek(&rt, &config, args)
        }
        Commands::Normalize { text } => cmd_normalize(text),
        Commands::Config => cmd_config(cli.config.as_deref(), &config),
    }
}
