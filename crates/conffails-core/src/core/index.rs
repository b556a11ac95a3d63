//! Maps each compound library to the molecules that failed in its log.
//!
//! Replaces the process-global dictionary of the original script: the index
//! is built by the parsing phase, owned by the workflow, and handed to the
//! collector once all parsing is done.

use std::collections::BTreeMap;

/// Library name → failed molecule IDs, in order of failure detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureIndex {
    libraries: BTreeMap<String, Vec<String>>,
}

impl FailureIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the failed molecules of one library, replacing (not merging)
    /// any earlier entry for the same library. An empty list is recorded too,
    /// so every parsed library has an entry.
    pub fn record(&mut self, library: impl Into<String>, failed: Vec<String>) {
        self.libraries.insert(library.into(), failed);
    }

    pub fn failed(&self, library: &str) -> Option<&[String]> {
        self.libraries.get(library).map(Vec::as_slice)
    }

    /// Iterates libraries in name order with their failed-molecule lists.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.libraries
            .iter()
            .map(|(lib, mols)| (lib.as_str(), mols.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    /// Total number of recorded failures across all libraries.
    pub fn total_failed(&self) -> usize {
        self.libraries.values().map(Vec::len).sum()
    }
}
