//! Watcher error types.

use std::path::PathBuf;

/// Errors that can occur while reading or watching the server log.
#[derive(thiserror::Error, Debug)]
pub enum WatcherError {
    /// Log file does not exist.
    #[error("Log file not found: {0}")]
    FileMissing(PathBuf),

    /// Permission denied accessing file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Log file is not valid UTF-8.
    #[error("Log file is not valid UTF-8: {0}")]
    InvalidUtf8(PathBuf),

    /// Notify watcher error.
    #[error("File watcher error: {0}")]
    Notify(#[from] notify::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
