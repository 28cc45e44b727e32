//! Report, export and merge commands.
//!
//! Every command:
//! 1. Validates its query arguments
//! 2. Loads and merges the dump files
//! 3. Applies excludes, matches and the sort
//! 4. Renders or writes the result

use super::models::{QueryArgs, SourceArgs};
use crate::output::{report, to_json_string, to_tree, write_dump, write_json};
use crate::parser::Loader;
use crate::store::{DataSet, SortField};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Check query arguments before any file is touched
///
/// **Public** - a bad flag must not consume files read with delete
pub fn validate_query(query: &QueryArgs) -> Result<()> {
    query
        .sort
        .parse::<SortField>()
        .context("Invalid --sort value")?;

    for filter in query.excludes.iter().chain(&query.matches) {
        filter
            .matcher(query.case_sensitive)
            .with_context(|| format!("Invalid filter {}={}", filter.key, filter.value))?;
    }

    Ok(())
}

/// Load every source file into one data set
pub fn load_dataset(source: &SourceArgs) -> Result<DataSet> {
    let start_time = Instant::now();

    let data = Loader::new(source.to_load_options())
        .load()
        .context("Failed to load dump files")?;

    debug!(
        "Loaded {} records in {:.2}s",
        data.count(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(data)
}

/// Apply excludes, then matches, then the sort
pub fn apply_query(data: &mut DataSet, query: &QueryArgs) -> Result<()> {
    for filter in &query.excludes {
        let matcher = filter.matcher(query.case_sensitive)?;
        let left = data.exclude(&filter.key, &matcher)?;
        info!("Excluded {}={}: {} records left", filter.key, filter.value, left);
    }

    for filter in &query.matches {
        let matcher = filter.matcher(query.case_sensitive)?;
        let left = data.match_key(&filter.key, &matcher)?;
        info!("Matched {}={}: {} records left", filter.key, filter.value, left);
    }

    data.sort(&query.sort, query.reverse)?;
    Ok(())
}

/// Build the text report for the top `number` records
///
/// **Public** - main entry point for `report`
pub fn execute_report(source: &SourceArgs, query: &QueryArgs, number: usize) -> Result<String> {
    validate_query(query)?;
    let mut data = load_dataset(source)?;
    apply_query(&mut data, query)?;
    Ok(report(&data, number))
}

/// Export the hierarchical view as JSON
///
/// Returns the JSON text when no output path is given.
pub fn execute_tree(source: &SourceArgs, output: Option<&Path>) -> Result<Option<String>> {
    let data = load_dataset(source)?;
    let tree = to_tree(data.records());

    match output {
        Some(path) => {
            write_json(&tree, path).context("Failed to write tree JSON")?;
            info!("✓ Tree written to: {}", path.display());
            Ok(None)
        }
        None => Ok(Some(to_json_string(&tree)?)),
    }
}

/// Export the filtered, sorted record list as JSON
///
/// Returns the JSON text when no output path is given.
pub fn execute_nodes(
    source: &SourceArgs,
    query: &QueryArgs,
    output: Option<&Path>,
) -> Result<Option<String>> {
    validate_query(query)?;
    let mut data = load_dataset(source)?;
    apply_query(&mut data, query)?;

    match output {
        Some(path) => {
            write_json(data.records(), path).context("Failed to write nodes JSON")?;
            info!("✓ {} records written to: {}", data.count(), path.display());
            Ok(None)
        }
        None => Ok(Some(to_json_string(data.records())?)),
    }
}

/// Merge all sources into a single dump file at `output`
pub fn execute_merge(source: &SourceArgs, output: &Path) -> Result<()> {
    let data = load_dataset(source)?;

    write_dump(&data, output).context("Failed to write merged dump")?;
    info!("✓ Merged dump written to: {}", output.display());
    Ok(())
}
