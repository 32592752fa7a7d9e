//! Roster module tests.

mod property_test;
mod reconcile_test;

/// Verify all public roster types are exported from the library.
#[test]
fn test_all_roster_types_exported() {
    use core_keeper_notifier::roster::{
        parse_events, parse_line, reconcile, LogEvent, PlayerId, PlayerName, Reconciliation,
        Roster, RosterEntry, Transition,
    };

    let name: PlayerName = "Alice".to_string();
    let entry = RosterEntry::new(PlayerId::new("1"), name);
    let _ = Transition::Joined(entry.clone());
    let _ = Transition::Left(entry);
    let _ = LogEvent::Unrecognized;
    let _: Reconciliation = reconcile::<&str>(&[], &Roster::new());
    assert_eq!(parse_line("noise"), LogEvent::Unrecognized);
    assert_eq!(parse_events("noise").count(), 0);
}
