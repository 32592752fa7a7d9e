//! Core Keeper Notifier - announce player joins and leaves from a server log.

pub mod config;
pub mod display;
pub mod monitor;
pub mod roster;
pub mod sink;
pub mod watcher;
