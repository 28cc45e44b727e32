//! Dump file parsing and data model.
//!
//! This module handles:
//! - Escaping of path keys embedded in the grammar
//! - Parsing dump file headers and bodies
//! - Loading and merging one or more files
//! - Defining the record schema

pub mod dump_file;
pub mod escape;
pub mod loader;
pub mod schema;

// Re-export main types
pub use dump_file::{parse_body_line, parse_dump, parse_header_line, BodyLine};
pub use escape::{escape_key, unescape_key};
pub use loader::{load, LoadOptions, Loader, RecordFilter};
pub use schema::{Header, Record, Statistics};
