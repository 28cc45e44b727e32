//! Data model for loaded dump files.
//!
//! A dump file holds one record per unique path key, each carrying a
//! fixed seven-field statistics tuple.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Aggregated timing statistics for one path key.
///
/// Durations are seconds and may be slightly negative from clock noise;
/// timestamps are floating epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of calls
    pub count: u64,

    /// Sum of all call durations
    pub total: f64,

    /// Duration of the first call
    pub first: f64,

    /// Shortest call duration
    pub shortest: f64,

    /// Longest call duration
    pub longest: f64,

    /// Timestamp of the first call
    pub first_at: f64,

    /// Timestamp of the last call
    pub last_at: f64,
}

impl Statistics {
    /// Build a tuple in dump-file field order
    pub fn new(
        count: u64,
        total: f64,
        first: f64,
        shortest: f64,
        longest: f64,
        first_at: f64,
        last_at: f64,
    ) -> Self {
        Self {
            count,
            total,
            first,
            shortest,
            longest,
            first_at,
            last_at,
        }
    }

    /// Mean duration per call (zero when there are no calls)
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// One path key plus its statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub stats: Statistics,

    /// Path segments, outermost first
    pub path: Vec<String>,
}

impl Record {
    pub fn new(path: Vec<String>, stats: Statistics) -> Self {
        Self { stats, path }
    }

    /// The 1-based `n`th path segment, if the record is that deep
    pub fn key(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.path.get(i))
            .map(String::as_str)
    }
}

/// Header read from the first non-empty dump file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Identifier of the profiler that wrote the file (first line)
    pub profiler: String,

    /// `key = value` entries in file order
    pub entries: IndexMap<String, String>,
}

impl Header {
    pub fn new(profiler: impl Into<String>) -> Self {
        Self {
            profiler: profiler.into(),
            entries: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_key_is_one_based() {
        let record = Record::new(
            vec!["a".to_string(), "b".to_string()],
            Statistics::new(1, 0.1, 0.1, 0.1, 0.1, 1.0, 1.0),
        );

        assert_eq!(record.key(0), None);
        assert_eq!(record.key(1), Some("a"));
        assert_eq!(record.key(2), Some("b"));
        assert_eq!(record.key(3), None);
    }

    #[test]
    fn test_average_handles_zero_count() {
        let stats = Statistics::new(0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(stats.average(), 0.0);

        let stats = Statistics::new(4, 2.0, 0.5, 0.5, 0.5, 0.0, 1.0);
        assert_eq!(stats.average(), 0.5);
    }
}
