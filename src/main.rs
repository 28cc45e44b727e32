//! Profdata CLI
//!
//! Reads performance-trace dump files, merges them and prints a report
//! of the most expensive call paths.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use profdata::commands::{
    execute_merge, execute_nodes, execute_report, execute_tree, FilterSpec, QueryArgs, SourceArgs,
};
use profdata::utils::config::{DEFAULT_DUMP_FILE, DEFAULT_REPORT_COUNT, DEFAULT_SORT_FIELD};

/// Profdata - reports over performance-trace dump files
#[derive(Parser, Debug)]
#[command(name = "profdata")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Dump files to read
#[derive(Args, Debug)]
struct SourceOpts {
    /// Dump files, merged in order
    #[arg(default_value = DEFAULT_DUMP_FILE)]
    files: Vec<PathBuf>,

    /// Delete the files after reading them
    #[arg(long)]
    delete: bool,

    /// Do not take a shared lock while reading
    #[arg(long)]
    no_lock: bool,
}

impl From<SourceOpts> for SourceArgs {
    fn from(opts: SourceOpts) -> Self {
        Self {
            files: opts.files,
            delete_after_read: opts.delete,
            lock_file: !opts.no_lock,
        }
    }
}

/// Sorting and filtering
#[derive(Args, Debug)]
struct QueryOpts {
    /// Sort field: longest, total, count, shortest or keyN
    #[arg(short, long, default_value = DEFAULT_SORT_FIELD)]
    sort: String,

    /// Smallest first
    #[arg(short, long)]
    reverse: bool,

    /// Drop records where keyN equals VALUE (or matches /REGEX/; add (?i) to ignore case)
    #[arg(short, long = "exclude", value_name = "keyN=VALUE")]
    exclude: Vec<FilterSpec>,

    /// Keep only records where keyN equals VALUE (or matches /REGEX/; add (?i) to ignore case)
    #[arg(short, long = "match", value_name = "keyN=VALUE")]
    matches: Vec<FilterSpec>,

    /// Compare filter values case-sensitively
    #[arg(short, long)]
    case_sensitive: bool,
}

impl From<QueryOpts> for QueryArgs {
    fn from(opts: QueryOpts) -> Self {
        Self {
            sort: opts.sort,
            reverse: opts.reverse,
            excludes: opts.exclude,
            matches: opts.matches,
            case_sensitive: opts.case_sensitive,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a text report of the top records
    Report {
        #[command(flatten)]
        source: SourceOpts,

        #[command(flatten)]
        query: QueryOpts,

        /// Number of records to show
        #[arg(short, long, default_value_t = DEFAULT_REPORT_COUNT)]
        number: usize,
    },

    /// Export records as a nested JSON tree keyed by path segment
    Tree {
        #[command(flatten)]
        source: SourceOpts,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the filtered, sorted record list as JSON
    Nodes {
        #[command(flatten)]
        source: SourceOpts,

        #[command(flatten)]
        query: QueryOpts,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge dump files into one
    Merge {
        #[command(flatten)]
        source: SourceOpts,

        /// Merged dump file to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Report {
            source,
            query,
            number,
        } => {
            let text = execute_report(&source.into(), &query.into(), number)?;
            print!("{}", text);
        }

        Commands::Tree { source, output } => {
            print_if_some(execute_tree(&source.into(), output.as_deref())?);
        }

        Commands::Nodes {
            source,
            query,
            output,
        } => {
            print_if_some(execute_nodes(&source.into(), &query.into(), output.as_deref())?);
        }

        Commands::Merge { source, output } => {
            execute_merge(&source.into(), &output)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Print command output destined for stdout
///
/// **Private** - internal helper
fn print_if_some(text: Option<String>) {
    if let Some(text) = text {
        println!("{}", text);
    }
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Profdata v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Reports over performance-trace dump files.");
}
