use crate::parser::LoadOptions;
use crate::store::{KeyField, Matcher};
use crate::utils::config::DEFAULT_SORT_FIELD;
use crate::utils::error::QueryError;
use std::path::PathBuf;
use std::str::FromStr;

/// Which dump files to read and how
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct SourceArgs {
    /// Dump files, in load order (empty = default file)
    pub files: Vec<PathBuf>,

    /// Delete each file once it has been read
    pub delete_after_read: bool,

    /// Share-lock files while reading
    pub lock_file: bool,
}

impl Default for SourceArgs {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            delete_after_read: false,
            lock_file: true,
        }
    }
}

impl SourceArgs {
    pub fn to_load_options(&self) -> LoadOptions {
        LoadOptions::from_files(self.files.iter().cloned())
            .with_delete_after_read(self.delete_after_read)
            .with_lock_file(self.lock_file)
    }
}

/// A `keyN=value` filter from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub key: String,
    pub value: String,
}

impl FromStr for FilterSpec {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| QueryError::InvalidKeyField(s.to_string()))?;
        let KeyField(_) = key.parse()?;
        Ok(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

impl FilterSpec {
    pub fn matcher(&self, case_sensitive: bool) -> Result<Matcher, QueryError> {
        Matcher::parse(&self.value, case_sensitive)
    }
}

/// Sort and filter settings applied after loading
#[derive(Debug, Clone)]
pub struct QueryArgs {
    /// Sort field name
    pub sort: String,

    /// Smallest first
    pub reverse: bool,

    /// Records to drop, applied in order
    pub excludes: Vec<FilterSpec>,

    /// Records to keep, applied after excludes
    pub matches: Vec<FilterSpec>,

    /// Compare filter values case-sensitively
    pub case_sensitive: bool,
}

impl Default for QueryArgs {
    fn default() -> Self {
        Self {
            sort: DEFAULT_SORT_FIELD.to_string(),
            reverse: false,
            excludes: Vec::new(),
            matches: Vec::new(),
            case_sensitive: false,
        }
    }
}
