//! Configuration display.

use std::path::Path;

use crate::config::{self, Config};

/// Print where config is read from and the values in effect
pub fn cmd_config(explicit: Option<&Path>, config: &Config) -> anyhow::Result<()> {
    match explicit.map(Path::to_path_buf).or_else(config::config_path) {
        Some(path) if path.exists() => println!("# Config file: {}", path.display()),
        Some(path) => println!("# Config file: {} (not found, using defaults)", path.display()),
        None => println!("# No config directory available, using defaults"),
    }
    println!();
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
