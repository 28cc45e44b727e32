//! CLI command implementations.
//!
//! Commands orchestrate the loader, store and output modules to perform
//! user tasks.

pub mod models;
pub mod report;

// Re-export main command functions
pub use models::{FilterSpec, QueryArgs, SourceArgs};
pub use report::{
    apply_query, execute_merge, execute_nodes, execute_report, execute_tree, load_dataset,
    validate_query,
};
