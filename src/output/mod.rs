//! Views and writers over a loaded data set.
//!
//! This module handles:
//! - Text reports (per-record blocks and the full report)
//! - Hierarchical tree export
//! - Dump-file and JSON writers

pub mod dump;
pub mod json;
pub mod report;
pub mod tree;

// Re-export main functions
pub use dump::{dump_to_string, write_dump, write_dump_to};
pub use json::{to_json_string, write_json};
pub use report::{format_record, report};
pub use tree::{to_tree, Tree, TreeNode};
