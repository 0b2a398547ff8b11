//! Console output.
//!
//! Renders into a `String` so the CLI decides where it goes. Rows are
//! coloured by bucket through `colored`, which honours `NO_COLOR` and the
//! CLI's `--no-color` override.

use colored::{Color, Colorize};

use crate::model::{Bucket, Reconciliation};

const BUCKETS: [Bucket; 3] = [
    Bucket::MatchedInDatabase,
    Bucket::MatchedOnFilesystem,
    Bucket::Unmatched,
];

/// Green for the database, yellow for disk only, red for missing.
pub fn bucket_color(bucket: Bucket) -> Color {
    match bucket {
        Bucket::MatchedInDatabase => Color::Green,
        Bucket::MatchedOnFilesystem => Color::Yellow,
        Bucket::Unmatched => Color::Red,
    }
}

/// A table cell, optionally painted.
#[derive(Debug, Clone)]
struct Cell {
    text: String,
    color: Option<Color>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    fn painted(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }

    fn render(&self) -> String {
        match self.color {
            Some(color) => self.text.as_str().color(color).to_string(),
            None => self.text.clone(),
        }
    }
}

/// Bucket counts as a grid table, status cells coloured.
pub fn render_summary(result: &Reconciliation) -> String {
    let rows: Vec<Vec<Cell>> = BUCKETS
        .iter()
        .map(|b| {
            vec![
                Cell::painted(b.as_str(), bucket_color(*b)),
                Cell::plain(result.summary.count(*b).to_string()),
            ]
        })
        .collect();

    format!("Summary:\n{}", grid(&["status", "count"], &rows))
}

/// Unmatched items as "{artist} - {title}" lines, or "" if everything matched.
pub fn render_unmatched(result: &Reconciliation) -> String {
    let missing: Vec<String> = result
        .in_bucket(Bucket::Unmatched)
        .map(|item| format!("{} - {}", item.query.artist, item.query.title))
        .collect();

    if missing.is_empty() {
        return String::new();
    }

    let header = Bucket::Unmatched.as_str();
    let rule = "-".repeat(header.len());
    let mut lines = vec![header.to_string(), rule.clone()];
    lines.extend(missing);
    lines.push(rule);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Per-item table, each row coloured by bucket, followed by every hit of
/// every matched item.
pub fn render_details(result: &Reconciliation) -> String {
    let rows: Vec<Vec<Cell>> = result
        .items
        .iter()
        .map(|item| {
            let bucket = item.bucket();
            let color = bucket_color(bucket);
            vec![
                Cell::painted(item.query.artist.as_str(), color),
                Cell::painted(item.query.title.as_str(), color),
                Cell::painted(item.database_count().to_string(), color),
                Cell::painted(item.filesystem_count().to_string(), color),
                Cell::painted(bucket.as_str(), color),
            ]
        })
        .collect();

    let mut out = format!(
        "Detailed summary:\n{}",
        grid(&["artist", "title", "db_count", "fs_count", "status"], &rows)
    );

    for item in &result.items {
        let term = item.query.term();
        if !item.database_hits.is_empty() {
            out.push_str(&format!(
                "\n[{term}] Database matches ({}):\n",
                item.database_count()
            ));
            for hit in &item.database_hits {
                out.push_str(&format!("  - {} (score {})\n", hit.label, hit.score));
            }
        }
        if !item.filesystem_hits.is_empty() {
            out.push_str(&format!(
                "\n[{term}] Filesystem matches ({}):\n",
                item.filesystem_count()
            ));
            for hit in &item.filesystem_hits {
                let path = hit
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                out.push_str(&format!("  - {} (score {}) at {}\n", hit.label, hit.score, path));
            }
        }
    }

    out
}

/// A "+---+" bordered table with left-aligned cells.
///
/// Widths come from the unpainted text so colour codes never skew columns.
fn grid(headers: &[&str], rows: &[Vec<Cell>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let border = |fill: char| {
        let mut line = String::from("+");
        for width in &widths {
            line.extend(std::iter::repeat_n(fill, width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };
    let line = |cells: &[Cell]| {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(&widths) {
            let pad = " ".repeat(width - cell.width());
            line.push_str(&format!(" {}{pad} |", cell.render()));
        }
        line.push('\n');
        line
    };

    let header_cells: Vec<Cell> = headers.iter().map(|h| Cell::plain(*h)).collect();
    let mut out = border('-');
    out.push_str(&line(&header_cells));
    out.push_str(&border('='));
    for row in rows {
        out.push_str(&line(row));
        out.push_str(&border('-'));
    }
    out
}
