//! Property-based tests for roster reconciliation.
//!
//! Logs are generated from a small id space so connects, disconnects and
//! reconnects of the same player collide often.

use std::collections::BTreeSet;

use core_keeper_notifier::roster::{reconcile, PlayerId, Roster, RosterEntry, Transition};
use proptest::prelude::*;

fn log_line() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u8..6, "[A-Za-z][A-Za-z ]{0,8}[A-Za-z]")
            .prop_map(|(id, name)| format!("[userid:{id}] player {name} connected")),
        (0u8..6).prop_map(|id| format!("Disconnected from userid:{id}")),
        Just("Saving world...".to_string()),
    ]
}

fn previous_roster() -> impl Strategy<Value = Roster> {
    prop::collection::btree_map(0u8..6, "[A-Za-z]{1,8}", 0..6).prop_map(|players| {
        players
            .into_iter()
            .map(|(id, name)| RosterEntry::new(id.to_string().as_str(), name))
            .collect()
    })
}

fn ids(roster: &Roster) -> BTreeSet<PlayerId> {
    roster.ids().cloned().collect()
}

proptest! {
    #[test]
    fn reconcile_is_idempotent(
        lines in prop::collection::vec(log_line(), 0..30),
        previous in previous_roster(),
    ) {
        prop_assert_eq!(reconcile(&lines, &previous), reconcile(&lines, &previous));
    }

    #[test]
    fn membership_is_conserved(
        lines in prop::collection::vec(log_line(), 0..30),
        previous in previous_roster(),
    ) {
        let result = reconcile(&lines, &previous);

        let arrivals: BTreeSet<PlayerId> = result
            .transitions
            .iter()
            .filter(|t| !t.is_departure())
            .map(|t| t.entry().id.clone())
            .collect();
        let departures: BTreeSet<PlayerId> = result
            .transitions
            .iter()
            .filter(|t| t.is_departure())
            .map(|t| t.entry().id.clone())
            .collect();

        prop_assert!(arrivals.is_disjoint(&departures));

        let expected: BTreeSet<PlayerId> = ids(&previous)
            .union(&arrivals)
            .filter(|id| !departures.contains(*id))
            .cloned()
            .collect();
        prop_assert_eq!(ids(&result.roster), expected);
    }

    #[test]
    fn departures_precede_arrivals(
        lines in prop::collection::vec(log_line(), 0..30),
        previous in previous_roster(),
    ) {
        let result = reconcile(&lines, &previous);
        let first_arrival = result
            .transitions
            .iter()
            .position(|t| matches!(t, Transition::Joined(_)))
            .unwrap_or(result.transitions.len());
        prop_assert!(result.transitions[first_arrival..]
            .iter()
            .all(|t| !t.is_departure()));
    }

    #[test]
    fn applying_result_settles(
        lines in prop::collection::vec(log_line(), 0..30),
        previous in previous_roster(),
    ) {
        let first = reconcile(&lines, &previous);
        let second = reconcile(&lines, &first.roster);
        prop_assert!(second.transitions.is_empty());
        prop_assert_eq!(second.roster, first.roster);
    }

    #[test]
    fn departures_keep_remembered_names(
        lines in prop::collection::vec(log_line(), 0..30),
        previous in previous_roster(),
    ) {
        let result = reconcile(&lines, &previous);
        for transition in &result.transitions {
            if let Transition::Left(entry) = transition {
                prop_assert_eq!(previous.get(&entry.id), Some(entry));
            }
        }
    }
}
