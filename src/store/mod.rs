//! In-memory record store.
//!
//! This module owns the merged records of a load and the operations
//! that reorder or narrow them:
//! - Sort by statistic or key segment
//! - Exclude / match on a key segment
//! - Independent copies via `clone()`

pub mod dataset;
pub mod query;

// Re-export main types
pub use dataset::DataSet;
pub use query::{KeyField, Matcher, SortField};
