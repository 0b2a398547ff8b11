//! The reconciliation run.

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use super::SeekArgs;
use crate::config::Config;
use crate::matching::{DatabaseIndex, FileIndex, TokenSetScorer};
use crate::reconcile::Reconciler;
use crate::{db, input, report};

/// Match a track list against both corpora and report the outcome
pub fn cmd_seek(rt: &Runtime, config: &Config, args: &SeekArgs) -> anyhow::Result<()> {
    let queries = input::load_queries(&args.input).context("Failed to load track list")?;
    let threshold = args.score.unwrap_or(config.matching.threshold);
    let database_path = args.db.clone().or_else(|| config.library.database.clone());
    let search_root = args.dir.clone().or_else(|| config.library.search_root.clone());
    let out_dir: PathBuf = args
        .out_dir
        .clone()
        .unwrap_or_else(|| config.report.directory.clone());

    info!(items = queries.len(), threshold, "Starting reconciliation");

    // Load the whole library before any matching; failure aborts the run
    let records = match &database_path {
        Some(path) => rt
            .block_on(db::load_records(&db::db_url(path)))
            .context("Failed to load library database")?,
        None => {
            warn!("No library database given, only the filesystem will be searched");
            Vec::new()
        }
    };
    let database = DatabaseIndex::new(&records);

    let files = search_root
        .as_deref()
        .map(FileIndex::build)
        .transpose()
        .context("Failed to index search root")?;

    info!(
        tracks = database.len(),
        files = files.as_ref().map_or(0, FileIndex::len),
        "Corpora ready"
    );

    let mut reconciler = Reconciler::new(&database, &TokenSetScorer, threshold)
        .parallel(args.parallel || config.matching.parallel);
    if let Some(files) = &files {
        reconciler = reconciler.with_files(files);
    }

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(queries.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("Processing items {bar:40} {pos}/{len} [{elapsed_precise}]")?,
        );
        bar
    };
    let result = reconciler.run_with_progress(&queries, |_| progress.inc(1));
    progress.finish_and_clear();

    println!();
    print!("{}", report::render_summary(&result));

    if args.verbose {
        println!();
        print!("{}", report::render_details(&result));
    } else {
        let unmatched = report::render_unmatched(&result);
        if !unmatched.is_empty() {
            println!();
            println!("{unmatched}");
        }
    }

    if args.dllist || args.report {
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("Failed to create report directory {}", out_dir.display()))?;
    }
    let stamp = report::files::timestamp();

    if args.dllist {
        if let Some(path) = report::write_download_list(&result, &out_dir, &stamp)? {
            info!(path = %path.display(), "download-list written");
        }
    }

    if args.report {
        let path = report::write_json_report(&result, &out_dir, &stamp)?;
        info!(path = %path.display(), "report written");
    }

    Ok(())
}
