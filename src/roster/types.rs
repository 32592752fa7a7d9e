//! Roster data types.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// Player identifier as printed in the server log (`userid:<digits>`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a player id from its textual form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Display name of a player. May contain whitespace and is not unique.
pub type PlayerName = String;

/// A connected player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: PlayerId,
    pub name: PlayerName,
}

impl RosterEntry {
    /// Create a new roster entry.
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, name: impl Into<PlayerName>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Currently connected players keyed by id.
///
/// Entries are only inserted through [`Roster::insert`], which keys each
/// entry by its own id, so a key always matches the id of its entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    players: BTreeMap<PlayerId, RosterEntry>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `entry.id`, returning the previous one.
    pub fn insert(&mut self, entry: RosterEntry) -> Option<RosterEntry> {
        self.players.insert(entry.id.clone(), entry)
    }

    /// Remove a player from the roster.
    pub fn remove(&mut self, id: &PlayerId) -> Option<RosterEntry> {
        self.players.remove(id)
    }

    /// Look up a player by id.
    #[must_use]
    pub fn get(&self, id: &PlayerId) -> Option<&RosterEntry> {
        self.players.get(id)
    }

    /// Check whether a player is connected.
    #[must_use]
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.contains_key(id)
    }

    /// Number of connected players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check whether nobody is connected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Iterate over entries in id order.
    pub fn iter(&self) -> btree_map::Values<'_, PlayerId, RosterEntry> {
        self.players.values()
    }

    /// Iterate over connected ids in order.
    pub fn ids(&self) -> btree_map::Keys<'_, PlayerId, RosterEntry> {
        self.players.keys()
    }
}

impl FromIterator<RosterEntry> for Roster {
    fn from_iter<I: IntoIterator<Item = RosterEntry>>(iter: I) -> Self {
        let mut roster = Self::new();
        for entry in iter {
            roster.insert(entry);
        }
        roster
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a RosterEntry;
    type IntoIter = btree_map::Values<'a, PlayerId, RosterEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A change in membership to announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Player appeared in the roster.
    Joined(RosterEntry),
    /// Player disappeared from the roster.
    Left(RosterEntry),
}

impl Transition {
    /// Get the player this transition is about.
    #[must_use]
    pub fn entry(&self) -> &RosterEntry {
        match self {
            Self::Joined(entry) | Self::Left(entry) => entry,
        }
    }

    /// Check whether this is a departure.
    #[must_use]
    pub fn is_departure(&self) -> bool {
        matches!(self, Self::Left(_))
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Joined(entry) => write!(f, "{} ({}) joined", entry.name, entry.id),
            Self::Left(entry) => write!(f, "{} ({}) left", entry.name, entry.id),
        }
    }
}
