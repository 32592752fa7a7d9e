//! Player event parsing for Core Keeper server log lines.
//!
//! Two line shapes carry membership information:
//!
//! ```text
//! [userid:76561198000000001] player Alice connected
//! Disconnected from userid:76561198000000001
//! ```
//!
//! Everything else in the log is ignored.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{PlayerId, PlayerName};

static CONNECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[userid:(\d+)]\s+player\s+(.+)\s+connected").expect("valid connect pattern")
});

static DISCONNECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Disconnected\s+from\s+userid:(\d+)").expect("valid disconnect pattern")
});

/// A membership event extracted from one log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// A player connected under the given name.
    Connect { id: PlayerId, name: PlayerName },
    /// A player disconnected. Disconnect lines carry no name.
    Disconnect { id: PlayerId },
    /// The line matched neither pattern.
    Unrecognized,
}

/// Classify a single log line.
///
/// If a line somehow matches both patterns the connect wins; use
/// [`parse_events`] to observe both.
#[must_use]
pub fn parse_line(line: &str) -> LogEvent {
    parse_events(line).next().unwrap_or(LogEvent::Unrecognized)
}

/// Extract every membership event from a line, connect before disconnect.
///
/// Yields nothing for unrecognized lines.
pub fn parse_events(line: &str) -> impl Iterator<Item = LogEvent> {
    parse_connect(line)
        .into_iter()
        .chain(parse_disconnect(line))
}

fn parse_connect(line: &str) -> Option<LogEvent> {
    let caps = CONNECT_RE.captures(line)?;
    let name = caps[2].trim();
    if name.is_empty() {
        return None;
    }
    Some(LogEvent::Connect {
        id: PlayerId::new(&caps[1]),
        name: name.to_string(),
    })
}

fn parse_disconnect(line: &str) -> Option<LogEvent> {
    let caps = DISCONNECT_RE.captures(line)?;
    Some(LogEvent::Disconnect {
        id: PlayerId::new(&caps[1]),
    })
}
