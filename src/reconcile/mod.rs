//! Runs every query against both corpora and classifies the outcome.
//!
//! Each query gets an [`ItemResult`] holding both hit lists. Its bucket is
//! decided by priority: any database hit wins, then any filesystem hit,
//! otherwise the track is unmatched.

use rayon::prelude::*;
use tracing::debug;

use crate::matching::{DatabaseIndex, FileIndex, SimilarityScorer};
use crate::model::{ItemResult, Query, Reconciliation};

/// Matching settings shared by every query in a run.
pub struct Reconciler<'a> {
    database: &'a DatabaseIndex,
    files: Option<&'a FileIndex>,
    scorer: &'a dyn SimilarityScorer,
    threshold: u8,
    parallel: bool,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler over a database corpus, with no search root.
    pub fn new(database: &'a DatabaseIndex, scorer: &'a dyn SimilarityScorer, threshold: u8) -> Self {
        Self {
            database,
            files: None,
            scorer,
            threshold,
            parallel: false,
        }
    }

    /// Also search the given file index.
    pub fn with_files(mut self, files: &'a FileIndex) -> Self {
        self.files = Some(files);
        self
    }

    /// Match queries on the rayon pool instead of one after another.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Both scans for a single query.
    pub fn reconcile(&self, query: &Query) -> ItemResult {
        let database_hits = self.database.scan(query, self.threshold, self.scorer);
        let filesystem_hits = self
            .files
            .map(|files| files.scan(query, self.threshold, self.scorer))
            .unwrap_or_default();

        debug!(
            target: "seekr::reconcile",
            term = %query.term(),
            database = database_hits.len(),
            filesystem = filesystem_hits.len(),
            "Item matched"
        );

        ItemResult {
            query: query.clone(),
            database_hits,
            filesystem_hits,
        }
    }

    /// Reconcile every query; results keep input order.
    pub fn run(&self, queries: &[Query]) -> Reconciliation {
        self.run_with_progress(queries, |_| {})
    }

    /// Like [`Reconciler::run`], calling `on_item` after each query finishes.
    ///
    /// In parallel mode `on_item` is called from worker threads in completion
    /// order; the returned items are still in input order.
    pub fn run_with_progress<F>(&self, queries: &[Query], on_item: F) -> Reconciliation
    where
        F: Fn(&ItemResult) + Sync,
    {
        let process = |query: &Query| {
            let item = self.reconcile(query);
            on_item(&item);
            item
        };

        let items: Vec<ItemResult> = if self.parallel {
            queries.par_iter().map(process).collect()
        } else {
            queries.iter().map(process).collect()
        };

        Reconciliation::new(items)
    }
}
