//! Integration tests for roster reconciliation.

use core_keeper_notifier::roster::{reconcile, PlayerId, Roster, RosterEntry, Transition};

fn roster(entries: &[(&str, &str)]) -> Roster {
    entries
        .iter()
        .map(|(id, name)| RosterEntry::new(*id, *name))
        .collect()
}

/// A slice of a real dedicated server log with two sessions.
const SERVER_LOG: &[&str] = &[
    "[14:02:11] Started session with Game ID 6M2fWxB9",
    "[14:05:40] [userid:76561198000000001] player Alice connected",
    "[14:07:02] [userid:76561198000000002] player Bob the Builder connected",
    "[14:20:18] Saving world...",
    "[14:31:55] Disconnected from userid:76561198000000001",
];

#[test]
fn server_log_yields_current_players() {
    let result = reconcile(SERVER_LOG, &Roster::new());

    assert_eq!(
        result.roster,
        roster(&[("76561198000000002", "Bob the Builder")])
    );
    assert_eq!(
        result.transitions,
        vec![Transition::Joined(RosterEntry::new(
            "76561198000000002",
            "Bob the Builder"
        ))]
    );
}

#[test]
fn growing_log_announces_each_change_once() {
    let mut current = Roster::new();
    let mut announced = Vec::new();

    for end in 1..=SERVER_LOG.len() {
        let result = reconcile(&SERVER_LOG[..end], &current);
        announced.extend(result.transitions);
        current = result.roster;
    }

    assert_eq!(
        announced,
        vec![
            Transition::Joined(RosterEntry::new("76561198000000001", "Alice")),
            Transition::Joined(RosterEntry::new("76561198000000002", "Bob the Builder")),
            Transition::Left(RosterEntry::new("76561198000000001", "Alice")),
        ]
    );

    // Nothing new appended: nothing announced.
    let again = reconcile(SERVER_LOG, &current);
    assert!(again.transitions.is_empty());
}

#[test]
fn rotated_log_reports_missing_players_as_left() {
    let before = reconcile(SERVER_LOG, &Roster::new()).roster;
    let rotated = ["[15:00:00] Started session with Game ID 6M2fWxB9"];

    let result = reconcile(&rotated, &before);

    assert!(result.roster.is_empty());
    assert_eq!(
        result.transitions,
        vec![Transition::Left(RosterEntry::new(
            "76561198000000002",
            "Bob the Builder"
        ))]
    );
}

#[test]
fn disconnect_without_connect_is_reported_but_harmless() {
    let lines = ["Disconnected from userid:5"];
    let result = reconcile(&lines, &Roster::new());

    assert!(result.transitions.is_empty());
    assert!(result.roster.is_empty());
    assert_eq!(result.unmatched_disconnects, vec![PlayerId::from("5")]);
}

#[test]
fn swap_reports_departure_then_arrival() {
    let previous = roster(&[("1", "Alice")]);
    let lines = [
        "[userid:1] player Alice connected",
        "Disconnected from userid:1",
        "[userid:2] player Bob connected",
    ];

    let result = reconcile(&lines, &previous);

    assert_eq!(
        result.transitions,
        vec![
            Transition::Left(RosterEntry::new("1", "Alice")),
            Transition::Joined(RosterEntry::new("2", "Bob")),
        ]
    );
    assert_eq!(result.roster, roster(&[("2", "Bob")]));
}
