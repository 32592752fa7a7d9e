//! Server log watcher with notify integration.
//!
//! Watches the directory containing the log file and forwards changes to
//! the log itself as [`WatchSignal`]s on a tokio channel.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify_debouncer_full::{
    new_debouncer,
    notify::{Event, EventKind, RecommendedWatcher, RecursiveMode},
    DebounceEventResult, Debouncer, RecommendedCache,
};
use tokio::sync::mpsc;

use super::error::WatcherError;

/// Default debounce window for filesystem events.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Signals emitted by the log watcher.
#[derive(Debug)]
pub enum WatchSignal {
    /// The log file was modified.
    Modified,
    /// Some other filesystem event touched the log file.
    Other(EventKind),
    /// The underlying watcher reported an error.
    Error(WatcherError),
}

/// Watches a single log file for changes.
///
/// Dropping the watcher stops event delivery and closes the channel.
pub struct LogWatcher {
    /// Resolved path of the log file.
    log_path: PathBuf,
    /// Keeps the OS watch alive.
    _debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
}

impl LogWatcher {
    /// Start watching `log_path`.
    ///
    /// Returns the watcher and the receiving end of its signal stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the file watcher cannot be created or the
    /// containing directory cannot be watched.
    pub fn new(
        log_path: &Path,
        debounce: Duration,
    ) -> Result<(Self, mpsc::UnboundedReceiver<WatchSignal>), WatcherError> {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();

        let log_path = resolve_log_path(log_path);
        let watch_dir = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let target = log_path.clone();
        let mut debouncer = new_debouncer(debounce, None, move |result: DebounceEventResult| {
            for signal in signals_for(result, &target) {
                // Receiver gone means the monitor stopped.
                if signal_tx.send(signal).is_err() {
                    return;
                }
            }
        })?;

        debouncer.watch(&watch_dir, RecursiveMode::NonRecursive)?;

        tracing::debug!(
            path = %log_path.display(),
            dir = %watch_dir.display(),
            "Watching server log"
        );

        Ok((
            Self {
                log_path,
                _debouncer: debouncer,
            },
            signal_rx,
        ))
    }

    /// Get the path being watched.
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

/// Turn a debounce batch into signals for `log_path`.
fn signals_for(result: DebounceEventResult, log_path: &Path) -> Vec<WatchSignal> {
    match result {
        Ok(events) => signals_from_events(events.iter().map(|e| &e.event), log_path),
        Err(errors) => errors
            .into_iter()
            .map(|e| WatchSignal::Error(WatcherError::Notify(e)))
            .collect(),
    }
}

fn signals_from_events<'a>(
    events: impl Iterator<Item = &'a Event>,
    log_path: &Path,
) -> Vec<WatchSignal> {
    events
        .filter(|event| event.paths.iter().any(|p| p == log_path))
        .map(|event| classify(event.kind))
        .collect()
}

fn classify(kind: EventKind) -> WatchSignal {
    match kind {
        EventKind::Modify(_) => WatchSignal::Modified,
        other => WatchSignal::Other(other),
    }
}

/// Make the log path absolute so it compares equal to notify's paths.
///
/// The file itself may not exist yet, so only the parent directory is
/// canonicalized when the full path cannot be.
fn resolve_log_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = std::fs::canonicalize(path) {
        return resolved;
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    match (std::fs::canonicalize(&parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}
