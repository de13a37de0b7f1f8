//! Extraction statistics tracking.
//!
//! Counts the rows the record extractor absorbed instead of failing on, so a
//! report can show how much of the response was skipped.

use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;

use super::types::ExtractionMiss;

/// Per-reason counters of absorbed extraction misses.
///
/// All miss kinds are initialized to zero on creation, so the serialized form
/// always lists every kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractionStats {
    misses: BTreeMap<ExtractionMiss, usize>,
}

impl ExtractionStats {
    /// Creates empty counters.
    pub fn new() -> Self {
        Self {
            misses: ExtractionMiss::iter().map(|miss| (miss, 0)).collect(),
        }
    }

    /// Records one absorbed miss.
    pub fn record(&mut self, miss: ExtractionMiss) {
        *self.misses.entry(miss).or_insert(0) += 1;
    }

    /// Returns the count for one miss kind.
    pub fn count(&self, miss: ExtractionMiss) -> usize {
        self.misses.get(&miss).copied().unwrap_or(0)
    }

    /// Total rows skipped for any reason.
    pub fn total(&self) -> usize {
        self.misses.values().sum()
    }
}

impl Default for ExtractionStats {
    fn default() -> Self {
        Self::new()
    }
}
