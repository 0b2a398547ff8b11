//! Text normalization preview.

use crate::matching::{normalize, split_artists};

/// Print each input's normalized form and artist tokens
pub fn cmd_normalize(text: &[String]) -> anyhow::Result<()> {
    for raw in text {
        let normalized = normalize(raw);
        let tokens = split_artists(&normalized);
        println!("{raw:?}");
        println!("  normalized: {normalized:?}");
        println!("  artists:    {tokens:?}");
    }
    Ok(())
}
