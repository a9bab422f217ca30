//! Error types for the log tailer library.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for log tailer operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The log file did not exist when an operation checked for it.
    #[error("Log file not found at path: {}", .path.display())]
    NotFound { path: PathBuf },

    /// I/O failure while reading the log file.
    #[error("Error reading log file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File watching errors from the notify crate.
    #[error("File watcher error: {0}")]
    Watcher(#[from] notify::Error),
}

impl Error {
    pub(crate) fn not_found(path: &Path) -> Self {
        Error::NotFound {
            path: path.to_path_buf(),
        }
    }

    pub(crate) fn read(path: &Path, source: std::io::Error) -> Self {
        Error::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns true if the log file was missing, which a caller may retry
    /// once the file has been created.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// A convenient Result type for log tailer operations.
pub type Result<T> = std::result::Result<T, Error>;
