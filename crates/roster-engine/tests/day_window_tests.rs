//! Tests for the auto-sized visible hour window of a day view.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Australia::Sydney;
use chrono_tz::UTC;
use roster_engine::{
    compute_day_window, CalendarConfig, DayWindow, Event, EventKind, EventsByProfile,
    ShiftInterval, ShiftsByProfile,
};

fn sydney(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Sydney
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
}

fn shift(start_minute: u16, end_minute: u16) -> ShiftsByProfile {
    let mut map: ShiftsByProfile = HashMap::new();
    map.insert(
        "P".to_string(),
        vec![ShiftInterval::new(
            "P",
            1,
            start_minute,
            end_minute,
            Some("Australia/Sydney"),
        )],
    );
    map
}

fn one_event(start: DateTime<Utc>, end: DateTime<Utc>) -> EventsByProfile {
    let mut map: EventsByProfile = HashMap::new();
    map.insert(
        "P".to_string(),
        vec![Event::new("e", "P", "Block", start, end, EventKind::Personal)],
    );
    map
}

fn window(
    shifts: &ShiftsByProfile,
    events: &EventsByProfile,
    config: &CalendarConfig,
) -> DayWindow {
    compute_day_window(monday(), shifts, events, Sydney, config)
}

#[test]
fn no_data_returns_default_window() {
    let w = window(&HashMap::new(), &HashMap::new(), &CalendarConfig::default());
    assert_eq!(w, DayWindow::new(6, 20));
}

#[test]
fn office_hours_fit_inside_default() {
    let w = window(&shift(9 * 60, 17 * 60), &HashMap::new(), &CalendarConfig::default());
    assert_eq!(w, DayWindow::new(6, 20));
}

#[test]
fn long_day_extends_window_with_padding() {
    // 05:00-22:30 -> floor(5)-1 = 4, ceil(22.5)+1 = 24
    let w = window(&shift(5 * 60, 22 * 60 + 30), &HashMap::new(), &CalendarConfig::default());
    assert_eq!(w, DayWindow::new(4, 24));
}

#[test]
fn early_event_recenters_then_widens() {
    // 02:15-03:00 -> 1..4 is too narrow; re-centered at 2.625 it clamps to 0..8,
    // then the default baseline widens the end to 20.
    let events = one_event(sydney(2026, 3, 9, 2, 15), sydney(2026, 3, 9, 3, 0));
    let w = window(&HashMap::new(), &events, &CalendarConfig::default());
    assert_eq!(w, DayWindow::new(0, 20));
}

#[test]
fn late_narrow_data_recenters_against_day_end() {
    let config = CalendarConfig {
        padding_minutes: 0,
        default_window: DayWindow::new(16, 18),
        ..CalendarConfig::default()
    };
    // 22:00-23:30 -> 22..24, re-centered at 22.75 -> 18..26 -> clamped to 16..24
    let events = one_event(sydney(2026, 3, 9, 22, 0), sydney(2026, 3, 9, 23, 30));
    let w = window(&HashMap::new(), &events, &config);
    assert_eq!(w, DayWindow::new(16, 24));
}

#[test]
fn partial_hour_padding_rounds_up() {
    let config = CalendarConfig {
        padding_minutes: 30,
        default_window: DayWindow::new(10, 12),
        ..CalendarConfig::default()
    };
    // 07:00-19:00 with ceil(0.5) = 1h of padding -> 6..20
    let w = window(&shift(7 * 60, 19 * 60), &HashMap::new(), &config);
    assert_eq!(w, DayWindow::new(6, 20));
}

#[test]
fn event_from_previous_evening_counts_from_midnight() {
    let events = one_event(sydney(2026, 3, 8, 22, 0), sydney(2026, 3, 9, 1, 0));
    let w = window(&HashMap::new(), &events, &CalendarConfig::default());
    assert_eq!(w, DayWindow::new(0, 20));
}

#[test]
fn events_on_other_days_are_ignored() {
    let events = one_event(sydney(2026, 3, 10, 1, 0), sydney(2026, 3, 10, 2, 0));
    let w = window(&HashMap::new(), &events, &CalendarConfig::default());
    assert_eq!(w, DayWindow::new(6, 20));
}

#[test]
fn all_day_leave_does_not_size_the_window() {
    let mut leave = Event::new(
        "l",
        "P",
        "Leave",
        sydney(2026, 3, 9, 0, 0),
        sydney(2026, 3, 9, 23, 0),
        EventKind::Leave,
    );
    leave.is_all_day = true;
    let mut events: EventsByProfile = HashMap::new();
    events.insert("P".to_string(), vec![leave]);

    let w = window(&HashMap::new(), &events, &CalendarConfig::default());
    assert_eq!(w, DayWindow::new(6, 20));
}

#[test]
fn shift_on_other_weekday_is_no_data() {
    let mut map: ShiftsByProfile = HashMap::new();
    map.insert(
        "P".to_string(),
        vec![ShiftInterval::new("P", 3, 60, 23 * 60, Some("Australia/Sydney"))],
    );
    let w = window(&map, &HashMap::new(), &CalendarConfig::default());
    assert_eq!(w, DayWindow::new(6, 20));
}

#[test]
fn shift_authored_elsewhere_sizes_the_viewing_date() {
    // Sydney Monday 09:00-17:00 is 22:00 Sunday to 06:00 Monday in UTC. On the
    // UTC Sunday it covers 22..24, re-centered to 16..24 and widened to 6..24.
    let sunday_utc = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
    let config = CalendarConfig::default();
    let shifts = shift(9 * 60, 17 * 60);
    let w = compute_day_window(sunday_utc, &shifts, &HashMap::new(), UTC, &config);
    assert_eq!(w, DayWindow::new(6, 24));
}

#[test]
fn narrow_data_keeps_the_minimum_span() {
    let config = CalendarConfig {
        default_window: DayWindow::new(12, 13),
        ..CalendarConfig::default()
    };
    let events = one_event(sydney(2026, 3, 9, 12, 0), sydney(2026, 3, 9, 12, 30));
    let w = window(&HashMap::new(), &events, &config);
    assert!(w.span() >= config.min_span_hours);
    assert_eq!(w, DayWindow::new(8, 16));
}
