//! Write a data set back out in the dump-file grammar.
//!
//! Consecutive records share their common path prefix: only the levels
//! that changed since the previous record get a `+` line.

use super::json::prepare_output_path;
use crate::parser::escape::escape_key;
use crate::parser::schema::Record;
use crate::store::DataSet;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write `data` to a dump file at `output_path`
///
/// **Public** - main entry point for dump output
///
/// # Errors
/// * `OutputError::InvalidPath` - Empty path or a directory
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_dump(data: &DataSet, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing {} records to: {}", data.count(), output_path.display());

    prepare_output_path(output_path)?;

    let mut writer = BufWriter::new(File::create(output_path)?);
    write_dump_to(data, &mut writer)?;
    writer.flush()?;

    Ok(())
}

/// Render `data` in the dump grammar into a string
pub fn dump_to_string(data: &DataSet) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_dump_to(data, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Serialize header and records to any writer
pub fn write_dump_to<W: Write>(data: &DataSet, writer: &mut W) -> io::Result<()> {
    let header = data.header();
    writeln!(writer, "{}", header.profiler)?;
    for (key, value) in &header.entries {
        writeln!(writer, "{} = {}", key, value)?;
    }
    writeln!(writer)?;

    // An empty path can only be expressed before any `+` line
    let (rootless, nested): (Vec<&Record>, Vec<&Record>) =
        data.records().iter().partition(|r| r.path.is_empty());

    let mut previous: &[String] = &[];
    for record in rootless.into_iter().chain(nested) {
        let path = record.path.as_slice();
        let mut common = previous
            .iter()
            .zip(path)
            .take_while(|(a, b)| a == b)
            .count();
        if common == path.len() && previous.len() > path.len() {
            // Re-emit the last level so deeper segments are dropped on read
            common = path.len().saturating_sub(1);
        }

        for (offset, segment) in path[common..].iter().enumerate() {
            writeln!(writer, "+ {} {}", common + offset + 1, escape_key(segment))?;
        }

        let s = &record.stats;
        writeln!(
            writer,
            "= {} {} {} {} {} {} {}",
            s.count, s.total, s.first, s.shortest, s.longest, s.first_at, s.last_at
        )?;
        previous = path;
    }

    Ok(())
}
