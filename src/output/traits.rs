//! Output handler traits and types
//!
//! This module defines the trait interface for snapshot writers and the
//! errors they report.

use crate::output::Snapshot;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize snapshot: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Layout of the written snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// Single-line JSON, used when the crawl completes naturally
    Compact,

    /// Indented JSON, used when the deadline cuts the crawl short
    Pretty,
}

/// Trait for snapshot writers
///
/// A writer is invoked once per crawl, by whichever termination path wins.
pub trait OutputHandler {
    /// Writes the snapshot in the given style
    ///
    /// # Arguments
    ///
    /// * `snapshot` - Bodies and references accumulated by the crawl
    /// * `style` - Compact or indented layout
    fn write_snapshot(&self, snapshot: &Snapshot, style: OutputStyle) -> OutputResult<()>;
}
