//! Output module for crawl snapshots and summaries
//!
//! This module handles:
//! - The snapshot of accumulated bodies and references
//! - Writing it once as JSON, compact or indented depending on how the crawl ended
//! - Crawl statistics for the final report

mod json;
pub mod stats;
mod traits;

pub use json::{format_snapshot, JsonFileOutput};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult, OutputStyle};

use crate::crawler::CrawlOutcome;
use crate::state::{ReverseLinkGraph, SiteBody};
use serde::Serialize;
use std::collections::BTreeMap;

/// The crawl's output: page content and who referenced what
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    /// Successfully fetched URL -> extracted content
    pub bodies: BTreeMap<String, SiteBody>,

    /// Target URL -> referring URLs, in the order their fetches settled
    pub references: ReverseLinkGraph,
}

/// Writes the snapshot carried by a crawl outcome
///
/// Natural completion is written compact, a deadline cutoff indented.
///
/// # Returns
///
/// * `Ok(Some(style))` - The snapshot was written in `style`
/// * `Ok(None)` - The outcome carried no snapshot
/// * `Err(OutputError)` - Serialization or the write failed
pub fn write_outcome(
    outcome: &CrawlOutcome,
    handler: &dyn OutputHandler,
) -> OutputResult<Option<OutputStyle>> {
    let (report, style) = match outcome {
        CrawlOutcome::Completed(report) => (report, OutputStyle::Compact),
        CrawlOutcome::CutShort(report) => (report, OutputStyle::Pretty),
        CrawlOutcome::Preempted => return Ok(None),
    };

    handler.write_snapshot(&report.snapshot, style)?;
    Ok(Some(style))
}
