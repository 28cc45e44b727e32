//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading dump files
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock {}: {source}", path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to rename {} for deletion: {source}", path.display())]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Syntax error in header of {} line {line}: {content}", path.display())]
    Header {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("Invalid line in {} line {line}: {content}", path.display())]
    InvalidLine {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("Invalid data in {} line {line}: {reason}", path.display())]
    InvalidData {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

impl LoadError {
    /// Line number the error points at, if it came from the grammar
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Header { line, .. }
            | LoadError::InvalidLine { line, .. }
            | LoadError::InvalidData { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Usage errors raised by query and report calls
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Unknown sort field: {0} (expected longest, total, count, shortest or keyN)")]
    UnknownSortField(String),

    #[error("Invalid key field: {0:?} (expected keyN with N >= 1)")]
    InvalidKeyField(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
