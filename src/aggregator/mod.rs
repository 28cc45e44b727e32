//! Aggregation of records that share a path key.
//!
//! This module folds duplicate records together while dump files are
//! loaded:
//! - Statistics merge rules for one key
//! - The per-load dedup index

pub mod merge;

// Re-export main types and functions
pub use merge::{merge, RecordIndex};
