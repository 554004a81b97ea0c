use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, CleanError>;

/// Everything that can stop a cleaning run. Every variant is fatal.
#[derive(Debug, Error)]
pub enum CleanError {
    /// The input directory does not exist or is not a directory.
    #[error("input directory not found: {0}")]
    MissingInputDir(PathBuf),

    /// The input directory holds no regular files.
    #[error("no export files found in {0}")]
    NoInputFiles(PathBuf),

    /// Filesystem failure while listing, reading, renaming or creating paths.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV, a missing `Date` column, or an unparseable amount.
    #[error("failed to parse {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A `Date` cell none of the accepted formats could read.
    #[error("invalid date '{value}' in {file} at line {line}")]
    InvalidDate {
        file: String,
        line: u64,
        value: String,
    },

    /// Serializing the output table failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl CleanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CleanError::Io {
            path: path.into(),
            source,
        }
    }
}
