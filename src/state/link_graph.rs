use serde::Serialize;
use std::collections::BTreeMap;

/// Mapping from a target URL to the pages that linked to it
///
/// Entries are append-only: a source recorded against a target is never removed,
/// and a page that links to the same target twice is recorded twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReverseLinkGraph {
    references: BTreeMap<String, Vec<String>>,
}

impl ReverseLinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `source` links to `target`
    pub fn record(&mut self, target: &str, source: &str) {
        self.references
            .entry(target.to_string())
            .or_default()
            .push(source.to_string());
    }

    /// Returns the pages referencing `target`, in the order they were recorded
    pub fn referrers(&self, target: &str) -> Option<&[String]> {
        self.references.get(target).map(Vec::as_slice)
    }

    /// Number of distinct targets
    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Total number of recorded references, counting repeats
    pub fn edge_count(&self) -> usize {
        self.references.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.references.iter()
    }
}
