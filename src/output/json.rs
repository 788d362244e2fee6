//! JSON snapshot output

use crate::output::traits::{OutputHandler, OutputResult, OutputStyle};
use crate::output::Snapshot;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes snapshots as a JSON document to a file
#[derive(Debug, Clone)]
pub struct JsonFileOutput {
    path: PathBuf,
}

impl JsonFileOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputHandler for JsonFileOutput {
    fn write_snapshot(&self, snapshot: &Snapshot, style: OutputStyle) -> OutputResult<()> {
        let json = format_snapshot(snapshot, style)?;

        let mut file = File::create(&self.path)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;

        Ok(())
    }
}

/// Serializes a snapshot as `{"bodies": ..., "references": ...}`
pub fn format_snapshot(snapshot: &Snapshot, style: OutputStyle) -> OutputResult<String> {
    let json = match style {
        OutputStyle::Compact => serde_json::to_string(snapshot)?,
        OutputStyle::Pretty => serde_json::to_string_pretty(snapshot)?,
    };
    Ok(json)
}
