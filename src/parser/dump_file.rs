//! Dump file grammar.
//!
//! A dump file is line oriented:
//!
//! ```text
//! <profiler identifier>
//! key = value
//! ...
//! <blank line>
//! + 1 <escaped key>
//! + 2 <escaped key>
//! = count total first shortest longest first_at last_at
//! ```
//!
//! `+` lines maintain a stack of path segments indexed by depth, and each
//! `=` line emits one record for the current stack contents.

use super::escape::unescape_key;
use super::schema::{Header, Statistics};
use crate::utils::config::{MAX_DEPTH_GAP, NUMERIC_FIELD_CHARS, STAT_FIELD_COUNT};
use crate::utils::error::LoadError;
use log::{debug, warn};
use std::io::BufRead;
use std::path::Path;

/// One parsed body line
#[derive(Debug, Clone, PartialEq)]
pub enum BodyLine {
    /// `+ <depth> <key>`: set the segment at 1-based `depth`
    Path { depth: usize, key: String },

    /// `= <7 fields>`: a record for the current path
    Data(Statistics),
}

/// Why a body line was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum LineError {
    /// Neither a `+` nor a `=` line
    Shape,

    /// A `=` line with bad fields
    Data(String),
}

/// Parse a `key = value` header line
///
/// **Public** - also used to validate headers of later files
pub fn parse_header_line(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

/// Parse a single body line
///
/// **Public** - grammar entry point for one line
pub fn parse_body_line(line: &str) -> Result<BodyLine, LineError> {
    if let Some(rest) = line.strip_prefix("+ ") {
        let (depth, key) = rest.split_once(' ').unwrap_or((rest, ""));
        if depth.is_empty() || !depth.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LineError::Shape);
        }
        let depth: usize = depth.parse().map_err(|_| LineError::Shape)?;
        if depth == 0 {
            return Err(LineError::Shape);
        }
        return Ok(BodyLine::Path {
            depth,
            key: unescape_key(key),
        });
    }

    if let Some(rest) = line.strip_prefix("= ") {
        return parse_data_fields(rest).map(BodyLine::Data);
    }

    Err(LineError::Shape)
}

/// Parse the seven numeric fields of a `=` line
///
/// **Private** - internal helper for parse_body_line
fn parse_data_fields(fields: &str) -> Result<Statistics, LineError> {
    let fields: Vec<&str> = fields.split_whitespace().collect();
    if fields.len() != STAT_FIELD_COUNT {
        return Err(LineError::Data(format!(
            "expected {} fields, found {}",
            STAT_FIELD_COUNT,
            fields.len()
        )));
    }

    if let Some(bad) = fields
        .iter()
        .find(|f| !f.chars().all(|c| NUMERIC_FIELD_CHARS.contains(c)))
    {
        return Err(LineError::Data(format!("non-numeric field '{}'", bad)));
    }

    let count = fields[0]
        .parse::<u64>()
        .map_err(|_| LineError::Data(format!("count '{}' is not a whole number", fields[0])))?;
    if count == 0 {
        return Err(LineError::Data("count must be at least 1".to_string()));
    }

    let mut values = [0.0f64; STAT_FIELD_COUNT - 1];
    for (slot, field) in values.iter_mut().zip(&fields[1..]) {
        *slot = field
            .parse::<f64>()
            .map_err(|_| LineError::Data(format!("malformed number '{}'", field)))?;
    }

    let [total, first, shortest, longest, first_at, last_at] = values;
    Ok(Statistics::new(
        count, total, first, shortest, longest, first_at, last_at,
    ))
}

/// Parse one dump file
///
/// **Public** - called by the loader once per file
///
/// # Arguments
/// * `reader` - Buffered file contents
/// * `source` - Path used in error messages
/// * `on_record` - Receives each record's path and statistics in file order
///
/// # Returns
/// The file's header, or `None` if the file has no lines at all
///
/// # Errors
/// * `LoadError::Header` - Malformed line before the blank terminator
/// * `LoadError::InvalidLine` - Body line that is neither `+` nor `=`, or a
///   `+` line skipping more than `MAX_DEPTH_GAP` levels
/// * `LoadError::InvalidData` - `=` line with bad fields
/// * `LoadError::Read` - I/O failure while reading
pub fn parse_dump<R, F>(reader: R, source: &Path, mut on_record: F) -> Result<Option<Header>, LoadError>
where
    R: BufRead,
    F: FnMut(&[String], Statistics),
{
    let mut lines = reader.lines().enumerate();
    let read_err = |source_err| LoadError::Read {
        path: source.to_path_buf(),
        source: source_err,
    };

    let mut header = match lines.next() {
        Some((_, line)) => Header::new(line.map_err(read_err)?),
        None => return Ok(None),
    };

    for (index, line) in lines.by_ref() {
        let line = line.map_err(read_err)?;
        if line.trim().is_empty() {
            break;
        }
        match parse_header_line(&line) {
            Some((key, value)) => {
                header.entries.insert(key, value);
            }
            None => {
                return Err(LoadError::Header {
                    path: source.to_path_buf(),
                    line: index + 1,
                    content: line,
                })
            }
        }
    }

    let mut stack: Vec<String> = Vec::new();
    let mut records = 0usize;

    for (index, line) in lines {
        let line = line.map_err(read_err)?;
        match parse_body_line(&line) {
            Ok(BodyLine::Path { depth, key }) => {
                let skipped = (depth - 1).saturating_sub(stack.len());
                if skipped > MAX_DEPTH_GAP {
                    return Err(LoadError::InvalidLine {
                        path: source.to_path_buf(),
                        line: index + 1,
                        content: line,
                    });
                }
                if skipped > 0 {
                    warn!(
                        "{} line {}: depth {} skips a level, filling with empty keys",
                        source.display(),
                        index + 1,
                        depth
                    );
                }
                stack.resize(depth - 1, String::new());
                stack.push(key);
            }
            Ok(BodyLine::Data(stats)) => {
                on_record(&stack, stats);
                records += 1;
            }
            Err(LineError::Shape) => {
                return Err(LoadError::InvalidLine {
                    path: source.to_path_buf(),
                    line: index + 1,
                    content: line,
                })
            }
            Err(LineError::Data(reason)) => {
                return Err(LoadError::InvalidData {
                    path: source.to_path_buf(),
                    line: index + 1,
                    reason,
                })
            }
        }
    }

    debug!("Parsed {} data lines from {}", records, source.display());

    Ok(Some(header))
}
