//! Player roster tracking.
//!
//! Parses connect/disconnect lines and reconciles them into join and
//! leave transitions.

mod parser;
mod reconcile;
mod types;

pub use parser::{parse_events, parse_line, LogEvent};
pub use reconcile::{reconcile, Reconciliation};
pub use types::{PlayerId, PlayerName, Roster, RosterEntry, Transition};
