//! Whole-file log reader.

use std::path::{Path, PathBuf};

use super::error::WatcherError;

/// Reads the current contents of the server log as lines.
#[derive(Debug, Clone)]
pub struct LogReader {
    path: PathBuf,
}

impl LogReader {
    /// Create a reader for the given log file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path being read.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file and return its non-empty lines in order.
    ///
    /// Trailing carriage returns are stripped so logs written with CRLF
    /// line endings parse the same as LF ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or not UTF-8.
    pub async fn read(&self) -> Result<Vec<String>, WatcherError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(WatcherError::FileMissing(self.path.clone()));
            }
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(WatcherError::PermissionDenied(self.path.clone()));
            }
            Err(e) => return Err(WatcherError::Io(e)),
        };

        let text =
            String::from_utf8(bytes).map_err(|_| WatcherError::InvalidUtf8(self.path.clone()))?;

        Ok(split_lines(&text))
    }
}

/// Split text into non-empty lines.
fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
