//! The loaded data set: header, records and current sort label.

use crate::parser::schema::{Header, Record};
use crate::utils::config::UNSORTED_LABEL;
use serde::Serialize;

/// All records of one load plus the header of its first file.
///
/// Sorting and filtering mutate the record sequence in place. Use
/// `clone()` first to keep the unfiltered data; the copy shares nothing
/// with the original.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSet {
    header: Header,
    records: Vec<Record>,
    sort_label: String,
}

impl DataSet {
    pub fn new(header: Header, records: Vec<Record>) -> Self {
        Self {
            header,
            records,
            sort_label: UNSORTED_LABEL.to_string(),
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Records in current order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Field of the most recent sort, `"none"` before the first
    pub fn sort_label(&self) -> &str {
        &self.sort_label
    }

    /// Sum of `count` over all records
    pub fn total_count(&self) -> u64 {
        self.records.iter().map(|r| r.stats.count).sum()
    }

    /// Sum of `total` over all records
    pub fn total_time(&self) -> f64 {
        self.records.iter().map(|r| r.stats.total).sum()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<Record> {
        &mut self.records
    }

    pub(crate) fn set_sort_label(&mut self, label: String) {
        self.sort_label = label;
    }
}
