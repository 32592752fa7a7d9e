//! Roster reconciliation against a full log snapshot.
//!
//! Every pass replays the whole log rather than diffing appended lines.
//! Tracking "lines seen so far" breaks on truncation and rotation, while a
//! full replay only ever depends on what the file says right now.

use std::collections::{BTreeMap, BTreeSet};

use super::parser::{parse_events, LogEvent};
use super::types::{PlayerId, PlayerName, Roster, RosterEntry, Transition};

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Players connected according to the snapshot.
    pub roster: Roster,
    /// Departures (in id order) followed by arrivals (in id order).
    pub transitions: Vec<Transition>,
    /// Ids whose disconnect line had no earlier connect in the snapshot.
    ///
    /// Diagnostic only; these never produce transitions.
    pub unmatched_disconnects: Vec<PlayerId>,
}

impl Reconciliation {
    /// Check whether membership changed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.transitions.is_empty()
    }
}

/// Recompute membership from `lines` and diff it against `previous`.
///
/// Pure: the result depends only on the arguments.
#[must_use]
pub fn reconcile<S: AsRef<str>>(lines: &[S], previous: &Roster) -> Reconciliation {
    let mut present: BTreeMap<PlayerId, PlayerName> = BTreeMap::new();
    let mut unmatched_disconnects = Vec::new();
    let mut unmatched_seen = BTreeSet::new();

    for event in lines.iter().flat_map(|line| parse_events(line.as_ref())) {
        match event {
            LogEvent::Connect { id, name } => {
                present.insert(id, name);
            }
            LogEvent::Disconnect { id } => {
                if present.remove(&id).is_none() && unmatched_seen.insert(id.clone()) {
                    unmatched_disconnects.push(id);
                }
            }
            LogEvent::Unrecognized => {}
        }
    }

    let departures = previous
        .iter()
        .filter(|entry| !present.contains_key(&entry.id))
        .cloned()
        .map(Transition::Left);

    let arrivals = present
        .iter()
        .filter(|(id, _)| !previous.contains(id))
        .map(|(id, name)| Transition::Joined(RosterEntry::new(id.clone(), name.clone())));

    let transitions = departures.chain(arrivals).collect();

    let roster = present
        .into_iter()
        .map(|(id, name)| RosterEntry { id, name })
        .collect();

    Reconciliation {
        roster,
        transitions,
        unmatched_disconnects,
    }
}
