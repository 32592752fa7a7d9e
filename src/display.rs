//! Colored CLI display utilities for roster output.

use std::io::{self, Write};
use std::path::Path;

use owo_colors::OwoColorize;

use crate::roster::Roster;

/// Maximum length for displayed player names.
const MAX_NAME_LEN: usize = 40;

/// Truncate a string to a maximum number of characters, adding ellipsis if truncated.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}

/// Plain-text summary line for a roster.
#[must_use]
pub fn roster_summary(roster: &Roster) -> String {
    match roster.len() {
        0 => "No players online".to_string(),
        1 => "1 player online".to_string(),
        n => format!("{n} players online"),
    }
}

/// Print the current roster of a log file.
pub fn print_roster(roster: &Roster, log_path: &Path) {
    println!(
        "{} {} {}",
        "[ROSTER]".blue().bold(),
        roster_summary(roster),
        log_path.display().dimmed()
    );
    for entry in roster {
        println!(
            "  {} {}",
            truncate(&entry.name, MAX_NAME_LEN).bold(),
            format!("({})", entry.id).dimmed()
        );
    }
    let _ = io::stdout().flush();
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
}
