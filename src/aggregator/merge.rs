//! Merge statistics of records that share a path key.
//!
//! The same call site shows up once per dump file (and once per flush
//! of an appending writer). Records are keyed by their full path and
//! duplicates are folded together as they are read.

use crate::parser::schema::{Record, Statistics};
use log::debug;
use std::collections::HashMap;

/// Combine two statistics tuples for the same path key
///
/// `first` is kept from `existing`, the record loaded earlier.
pub fn merge(existing: &Statistics, incoming: &Statistics) -> Statistics {
    Statistics {
        count: existing.count + incoming.count,
        total: existing.total + incoming.total,
        first: existing.first,
        shortest: existing.shortest.min(incoming.shortest),
        longest: existing.longest.max(incoming.longest),
        first_at: existing.first_at.min(incoming.first_at),
        last_at: existing.last_at.max(incoming.last_at),
    }
}

/// Records in load order, deduplicated by path key.
///
/// Only lives for the duration of a load; the index is dropped by
/// [`RecordIndex::into_records`].
#[derive(Debug, Default)]
pub struct RecordIndex {
    records: Vec<Record>,
    by_path: HashMap<Vec<String>, usize>,
    merged: usize,
}

impl RecordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new record, or merge into the one already holding `path`
    pub fn insert(&mut self, path: &[String], stats: Statistics) {
        if let Some(&slot) = self.by_path.get(path) {
            let record = &mut self.records[slot];
            record.stats = merge(&record.stats, &stats);
            self.merged += 1;
            return;
        }

        self.by_path.insert(path.to_vec(), self.records.len());
        self.records.push(Record::new(path.to_vec(), stats));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of inserts folded into an existing record
    pub fn merged_count(&self) -> usize {
        self.merged
    }

    pub fn into_records(self) -> Vec<Record> {
        debug!(
            "Deduplicated {} records ({} merged)",
            self.records.len(),
            self.merged
        );
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_rules() {
        let a = Statistics::new(1, 0.01, 0.01, 0.01, 0.01, 100.0, 100.01);
        let b = Statistics::new(2, 0.04, 0.015, 0.015, 0.025, 200.0, 200.05);

        let merged = merge(&a, &b);

        assert_eq!(merged.count, 3);
        assert!((merged.total - 0.05).abs() < 1e-12);
        assert_eq!(merged.first, 0.01);
        assert_eq!(merged.shortest, 0.01);
        assert_eq!(merged.longest, 0.025);
        assert_eq!(merged.first_at, 100.0);
        assert_eq!(merged.last_at, 200.05);
    }

    #[test]
    fn test_merge_keeps_existing_first_even_when_later() {
        let existing = Statistics::new(1, 0.2, 0.2, 0.2, 0.2, 500.0, 500.2);
        let incoming = Statistics::new(1, 0.1, 0.1, 0.1, 0.1, 10.0, 10.1);

        let merged = merge(&existing, &incoming);

        assert_eq!(merged.first, 0.2);
        assert_eq!(merged.first_at, 10.0);
    }

    #[test]
    fn test_index_dedups_by_full_path() {
        let stats = Statistics::new(1, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0);
        let mut index = RecordIndex::new();

        index.insert(&path(&["a", "b"]), stats);
        index.insert(&path(&["a"]), stats);
        index.insert(&path(&["a", "b"]), stats);
        index.insert(&path(&["a", "c"]), stats);

        assert_eq!(index.len(), 3);
        assert_eq!(index.merged_count(), 1);

        let records = index.into_records();
        assert_eq!(records[0].path, path(&["a", "b"]));
        assert_eq!(records[0].stats.count, 2);
        assert_eq!(records[1].path, path(&["a"]));
        assert_eq!(records[2].path, path(&["a", "c"]));
    }
}
