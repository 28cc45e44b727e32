//! Configuration and constants for loading and reporting.

/// Dump file read when no path is given
pub const DEFAULT_DUMP_FILE: &str = "trace.prof";

/// Number of records shown by a report when no count is given
pub const DEFAULT_REPORT_COUNT: usize = 10;

/// Sort field used by the CLI when none is given
pub const DEFAULT_SORT_FIELD: &str = "total";

/// Sort label of a freshly loaded data set
pub const UNSORTED_LABEL: &str = "none";

/// Keys longer than this are rendered in their own block
pub const KEY_WRAP_WIDTH: usize = 72;

/// Number of numeric fields on a `=` data line
pub const STAT_FIELD_COUNT: usize = 7;

/// Most path levels a `+` line may skip; skipped levels become empty keys
pub const MAX_DEPTH_GAP: usize = 16;

/// Suffix appended to a dump file while it is read for deletion.
/// Writers appending to the original name are unaffected by the rename.
pub const DELETE_SUFFIX: &str = ".deleteme";

// Characters allowed inside a numeric data field
pub const NUMERIC_FIELD_CHARS: &str = "-+0123456789eE.";
