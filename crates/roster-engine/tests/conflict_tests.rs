//! Tests for overlap conflicts within a profile's events.

use chrono::{TimeZone, Utc};
use roster_engine::{find_conflicts, has_conflict, Event, EventKind};

/// Helper to create a meeting from hour/minute ranges on a given day.
fn event(
    id: &str,
    profile: &str,
    day: u32,
    start_hour: u32,
    start_min: u32,
    end_hour: u32,
    end_min: u32,
) -> Event {
    Event::new(
        id,
        profile,
        id,
        Utc.with_ymd_and_hms(2026, 3, day, start_hour, start_min, 0)
            .unwrap(),
        Utc.with_ymd_and_hms(2026, 3, day, end_hour, end_min, 0)
            .unwrap(),
        EventKind::Meeting,
    )
}

#[test]
fn overlapping_events_conflict() {
    // A: 09:00-10:00, B: 09:30-10:30
    let a = event("a", "p", 9, 9, 0, 10, 0);
    let b = event("b", "p", 9, 9, 30, 10, 30);
    assert!(has_conflict(&a, &[a.clone(), b.clone()]));
    assert!(has_conflict(&b, &[a, b.clone()]));
}

#[test]
fn adjacent_events_do_not_conflict() {
    // A: 09:00-10:00, B: 10:00-11:00 -> touching, not overlapping
    let a = event("a", "p", 9, 9, 0, 10, 0);
    let b = event("b", "p", 9, 10, 0, 11, 0);
    assert!(!has_conflict(&a, &[b.clone()]));
    assert!(!has_conflict(&b, &[a]));
}

#[test]
fn event_does_not_conflict_with_itself() {
    let a = event("a", "p", 9, 9, 0, 10, 0);
    assert!(!has_conflict(&a, &[a.clone()]));
}

#[test]
fn identity_is_by_id_not_by_value() {
    // A copy with a different id is a different event occupying the same time.
    let a = event("a", "p", 9, 9, 0, 10, 0);
    let mut twin = a.clone();
    twin.id = "a-copy".to_string();
    assert!(has_conflict(&a, &[a.clone(), twin]));
}

#[test]
fn empty_list_has_no_conflict() {
    let a = event("a", "p", 9, 9, 0, 10, 0);
    assert!(!has_conflict(&a, &[]));
}

#[test]
fn contained_event_conflicts() {
    // A: 09:00-12:00, B: 10:00-11:00 fully inside A
    let a = event("a", "p", 9, 9, 0, 12, 0);
    let b = event("b", "p", 9, 10, 0, 11, 0);
    assert!(has_conflict(&b, &[a.clone()]));

    let conflicts = find_conflicts(&[a, b]);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(
        conflicts[0].overlap_minutes, 60,
        "overlap should be the duration of the smaller event (60 min)"
    );
}

#[test]
fn find_conflicts_lists_every_pair() {
    let events = vec![
        event("a", "p", 9, 9, 0, 10, 0),
        event("b", "p", 9, 9, 30, 10, 30),
        event("c", "p", 9, 14, 0, 15, 0),
        event("d", "p", 9, 14, 30, 15, 30),
    ];

    let conflicts = find_conflicts(&events);

    assert_eq!(conflicts.len(), 2, "should find both conflicts");
    assert_eq!(conflicts[0].event_a.id, "a");
    assert_eq!(conflicts[0].event_b.id, "b");
    assert_eq!(conflicts[0].overlap_minutes, 30);
    assert_eq!(conflicts[1].event_a.id, "c");
    assert_eq!(conflicts[1].event_b.id, "d");
    assert_eq!(conflicts[1].overlap_minutes, 30);
}

#[test]
fn find_conflicts_keeps_profiles_apart() {
    let events = vec![
        event("a", "alice", 9, 9, 0, 10, 0),
        event("b", "bob", 9, 9, 0, 10, 0),
    ];
    assert!(find_conflicts(&events).is_empty());
}

#[test]
fn find_conflicts_reaches_past_other_profiles() {
    // Bob's event sits between Alice's two overlapping ones in start order.
    let events = vec![
        event("a1", "alice", 9, 9, 0, 12, 0),
        event("b1", "bob", 9, 9, 30, 10, 0),
        event("a2", "alice", 9, 11, 0, 13, 0),
    ];
    let conflicts = find_conflicts(&events);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].event_a.id, "a1");
    assert_eq!(conflicts[0].event_b.id, "a2");
}

#[test]
fn malformed_events_never_conflict() {
    let inverted = event("bad", "p", 9, 11, 0, 9, 0);
    let a = event("a", "p", 9, 9, 30, 10, 30);
    assert!(!has_conflict(&inverted, &[a.clone()]));
    assert!(!has_conflict(&a, &[inverted.clone()]));
    assert!(find_conflicts(&[a, inverted]).is_empty());
}
