//! Profdata
//!
//! Load, merge, query and report on performance-trace dump files.
//!
//! A dump file holds one record per unique call path with aggregated
//! timing statistics. Records from several files are merged by path,
//! then sorted, filtered and rendered as a text report, a nested tree
//! or JSON.
//!
//! ## Getting Started
//!
//! ```ignore
//! use profdata::parser::{LoadOptions, Loader};
//! use profdata::output::report;
//!
//! let mut data = Loader::new(LoadOptions::from_file("trace.prof")).load()?;
//! data.sort("total", false)?;
//! println!("{}", report(&data, 10));
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod store;
pub mod utils;

pub use parser::{LoadOptions, Loader, Record, Statistics};
pub use store::DataSet;
