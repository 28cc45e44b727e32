//! Load one or more dump files into a merged [`DataSet`].
//!
//! Each file is opened and share-locked so that a writer holding an
//! exclusive lock finishes first. With delete-after-read the file is
//! renamed before it is opened; a writer that reopens the original name
//! starts a fresh file instead of appending to the one being consumed.

use super::dump_file::parse_dump;
use super::schema::{Header, Statistics};
use crate::aggregator::RecordIndex;
use crate::store::DataSet;
use crate::utils::config::{DEFAULT_DUMP_FILE, DELETE_SUFFIX};
use crate::utils::error::LoadError;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Normalization hook run on every record before its merge key is taken
pub type RecordFilter<'a> = Box<dyn FnMut(&mut Vec<String>, &mut Statistics) + 'a>;

/// Which files to load and how
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Single file; takes precedence over `files`
    pub file: Option<PathBuf>,

    /// Files loaded in order
    pub files: Vec<PathBuf>,

    /// Rename, read, then delete each file
    pub delete_after_read: bool,

    /// Take a shared lock on each file while reading
    pub lock_file: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            file: None,
            files: Vec::new(),
            delete_after_read: false,
            lock_file: true,
        }
    }
}

impl LoadOptions {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn from_files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: paths.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_delete_after_read(mut self, delete: bool) -> Self {
        self.delete_after_read = delete;
        self
    }

    pub fn with_lock_file(mut self, lock: bool) -> Self {
        self.lock_file = lock;
        self
    }

    /// Files to read, in order
    pub fn paths(&self) -> Vec<PathBuf> {
        if let Some(file) = &self.file {
            vec![file.clone()]
        } else if !self.files.is_empty() {
            self.files.clone()
        } else {
            vec![PathBuf::from(DEFAULT_DUMP_FILE)]
        }
    }
}

/// Reads dump files and merges their records
pub struct Loader<'a> {
    options: LoadOptions,
    filter: Option<RecordFilter<'a>>,
}

impl<'a> Loader<'a> {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            filter: None,
        }
    }

    /// Rewrite each record's path or statistics before it is merged
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: FnMut(&mut Vec<String>, &mut Statistics) + 'a,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Load every configured file
    ///
    /// **Public** - main entry point for loading
    ///
    /// # Errors
    /// Any open, lock, rename or grammar failure aborts the load. A failed
    /// delete of a consumed file is only logged.
    pub fn load(mut self) -> Result<DataSet, LoadError> {
        let paths = self.options.paths();
        let mut index = RecordIndex::new();
        let mut header: Option<Header> = None;

        for path in &paths {
            match self.read_file(path, &mut index)? {
                Some(file_header) if header.is_none() => header = Some(file_header),
                Some(_) => debug!("Discarding header of {}", path.display()),
                None => debug!("Skipping empty file {}", path.display()),
            }
        }

        info!(
            "Loaded {} records from {} file(s)",
            index.len(),
            paths.len()
        );

        Ok(DataSet::new(header.unwrap_or_default(), index.into_records()))
    }

    /// Read one file into the shared index
    ///
    /// **Private** - internal helper for load
    fn read_file(
        &mut self,
        path: &Path,
        index: &mut RecordIndex,
    ) -> Result<Option<Header>, LoadError> {
        debug!("Reading dump file: {}", path.display());

        let read_path = if self.options.delete_after_read {
            let renamed = deletion_path(path);
            fs::rename(path, &renamed).map_err(|source| LoadError::Rename {
                path: path.to_path_buf(),
                source,
            })?;
            renamed
        } else {
            path.to_path_buf()
        };

        let file = File::open(&read_path).map_err(|source| LoadError::Open {
            path: read_path.clone(),
            source,
        })?;

        if self.options.lock_file {
            file.lock_shared().map_err(|source| LoadError::Lock {
                path: read_path.clone(),
                source,
            })?;
        }

        let filter = &mut self.filter;
        let parsed = parse_dump(BufReader::new(&file), path, |segments, stats| {
            match filter.as_mut() {
                Some(filter) => {
                    let mut segments = segments.to_vec();
                    let mut stats = stats;
                    filter(&mut segments, &mut stats);
                    index.insert(&segments, stats);
                }
                None => index.insert(segments, stats),
            }
        });

        if self.options.lock_file {
            if let Err(e) = file.unlock() {
                warn!("Failed to unlock {}: {}", read_path.display(), e);
            }
        }
        drop(file);

        let header = parsed?;

        if self.options.delete_after_read {
            match fs::remove_file(&read_path) {
                Ok(()) => debug!("Deleted {}", read_path.display()),
                Err(e) => warn!("Failed to delete {}: {}", read_path.display(), e),
            }
        }

        Ok(header)
    }
}

/// Load with no filter
///
/// **Public** - shorthand for `Loader::new(options).load()`
pub fn load(options: LoadOptions) -> Result<DataSet, LoadError> {
    Loader::new(options).load()
}

/// Name a file is moved to while it is consumed
///
/// **Private** - internal helper for read_file
fn deletion_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(DELETE_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_file_takes_precedence() {
        let options = LoadOptions {
            file: Some(PathBuf::from("one.prof")),
            files: vec![PathBuf::from("a.prof"), PathBuf::from("b.prof")],
            ..LoadOptions::default()
        };
        assert_eq!(options.paths(), vec![PathBuf::from("one.prof")]);
    }

    #[test]
    fn test_default_file() {
        assert_eq!(
            LoadOptions::default().paths(),
            vec![PathBuf::from(DEFAULT_DUMP_FILE)]
        );
    }

    #[test]
    fn test_deletion_path_appends_suffix() {
        assert_eq!(
            deletion_path(Path::new("/tmp/trace.prof")),
            PathBuf::from("/tmp/trace.prof.deleteme")
        );
    }
}
