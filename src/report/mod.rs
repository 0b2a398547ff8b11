//! Rendering a [`Reconciliation`] for people and for other tools.
//!
//! - [`console`]: summary table, unmatched list and the detailed view
//! - [`files`]: CSV download list and JSON report
//!
//! Reporting never changes order or classification: items appear in input
//! order and buckets come from [`crate::model::ItemResult::bucket`].

pub mod console;
pub mod files;

pub use console::{render_details, render_summary, render_unmatched};
pub use files::{write_download_list, write_json_report};
