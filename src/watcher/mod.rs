//! Watcher module for the Core Keeper server log.
//!
//! Provides whole-file reads and change notifications for the log file.

mod error;
mod log_watcher;
mod reader;

pub use error::WatcherError;
pub use log_watcher::{LogWatcher, WatchSignal, DEFAULT_DEBOUNCE};
pub use reader::LogReader;
