//! Roster data: recurring shifts, dated events, and the derived status types.

use std::collections::HashMap;

use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};
use crate::zone;

/// Minutes in a civil day. Minute-of-day fields live in `[0, MINUTES_PER_DAY)`.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Shifts keyed by profile id. A profile may hold several shifts per weekday.
pub type ShiftsByProfile = HashMap<String, Vec<ShiftInterval>>;

/// Events keyed by profile id.
pub type EventsByProfile = HashMap<String, Vec<Event>>;

/// A record owned by one staff profile.
pub trait ProfileRecord {
    fn profile_id(&self) -> &str;
}

impl ProfileRecord for ShiftInterval {
    fn profile_id(&self) -> &str {
        &self.profile_id
    }
}

impl ProfileRecord for Event {
    fn profile_id(&self) -> &str {
        &self.profile_id
    }
}

/// Group flat records by their profile id, keeping input order within a profile.
pub fn group_by_profile<T: ProfileRecord + Clone>(records: &[T]) -> HashMap<String, Vec<T>> {
    let mut map: HashMap<String, Vec<T>> = HashMap::new();
    for record in records {
        map.entry(record.profile_id().to_string())
            .or_default()
            .push(record.clone());
    }
    map
}

/// A half-open span between two absolute instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Open-interval overlap: `a.start < b.end && b.start < a.end`.
    /// Intervals that only touch (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// `start <= instant < end`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// `start < instant < end`; neither endpoint is inside.
    pub fn strictly_contains(&self, instant: DateTime<Utc>) -> bool {
        self.start < instant && instant < self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// A recurring weekly availability block for one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInterval {
    pub profile_id: String,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u8,
    pub start_minute: u16,
    pub end_minute: u16,
    /// IANA zone the shift was authored in. `None` marks a legacy record whose
    /// minutes are UTC on the fixed reference date.
    #[serde(default)]
    pub timezone: Option<String>,
}

impl ShiftInterval {
    pub fn new(
        profile_id: impl Into<String>,
        day_of_week: u8,
        start_minute: u16,
        end_minute: u16,
        timezone: Option<&str>,
    ) -> Self {
        Self {
            profile_id: profile_id.into(),
            day_of_week,
            start_minute,
            end_minute,
            timezone: timezone.map(str::to_string),
        }
    }

    /// Check the same-day invariant: weekday in 0..=6, minutes in range and
    /// `start_minute < end_minute`. Shifts never wrap past midnight.
    pub fn validate(&self) -> Result<()> {
        let fail = |message: String| {
            Err(RosterError::InvalidShift {
                profile_id: self.profile_id.clone(),
                message,
            })
        };
        if self.day_of_week > 6 {
            return fail(format!("day_of_week {} is not in 0..=6", self.day_of_week));
        }
        if self.end_minute >= MINUTES_PER_DAY {
            return fail(format!(
                "end_minute {} is past the end of the day",
                self.end_minute
            ));
        }
        if self.start_minute >= self.end_minute {
            return fail(format!(
                "start_minute {} must be before end_minute {}",
                self.start_minute, self.end_minute
            ));
        }
        Ok(())
    }

    pub fn weekday(&self) -> Option<Weekday> {
        weekday_from_index(self.day_of_week)
    }
}

/// What an event represents on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Meeting,
    Personal,
    Leave,
    /// An expanded occurrence of a recurring shift.
    WorkingHours,
}

/// Recurrence details carried by events that stand for a recurring shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceInfo {
    pub day_of_week: u8,
    /// Weekdays (0 = Sunday) the template repeats on.
    #[serde(default)]
    pub pattern: Vec<u8>,
}

/// A dated occurrence with absolute start and end instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub profile_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: EventKind,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub recurrence: Option<RecurrenceInfo>,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        profile_id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        kind: EventKind,
    ) -> Self {
        Self {
            id: id.into(),
            profile_id: profile_id.into(),
            title: title.into(),
            start,
            end,
            kind,
            is_all_day: false,
            recurrence: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.end <= self.start {
            return Err(RosterError::InvalidEvent {
                id: self.id.clone(),
                message: format!("end {} must be after start {}", self.end, self.start),
            });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// All-day applies to leave only; the flag is ignored on other kinds.
    pub fn is_all_day_leave(&self) -> bool {
        self.kind == EventKind::Leave && self.is_all_day
    }

    /// Stored instants as an interval.
    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }

    /// The span the event occupies when viewed in `tz`. All-day leave covers
    /// the whole civil day holding its stored start; everything else uses the
    /// stored instants.
    pub fn effective_interval(&self, tz: Tz) -> Interval {
        if self.is_all_day_leave() {
            if let Ok(day) = zone::day_bounds(zone::local_date(self.start, tz), tz) {
                return day;
            }
        }
        self.interval()
    }
}

/// A staff member's status at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Working,
    Busy,
    Off,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Working => write!(f, "working"),
            Status::Busy => write!(f, "busy"),
            Status::Off => write!(f, "off"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusInfo {
    pub status: Status,
    /// Set only when `status` is `Busy`.
    pub current_event: Option<Event>,
}

impl StatusInfo {
    pub fn off() -> Self {
        Self {
            status: Status::Off,
            current_event: None,
        }
    }
}

/// 0 = Sunday .. 6 = Saturday.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn group_by_profile_keeps_order_within_a_profile() {
        let shifts = vec![
            ShiftInterval::new("P", 1, 540, 720, None),
            ShiftInterval::new("Q", 1, 600, 900, None),
            ShiftInterval::new("P", 1, 780, 1020, None),
        ];
        let grouped: ShiftsByProfile = group_by_profile(&shifts);
        assert_eq!(grouped.len(), 2);
        let p = &grouped["P"];
        assert_eq!(p.len(), 2);
        assert_eq!(p[0].start_minute, 540);
        assert_eq!(p[1].start_minute, 780);
        assert_eq!(grouped["Q"].len(), 1);
    }

    #[test]
    fn weekday_index_round_trips_through_sunday_first_numbering() {
        for i in 0..7 {
            let wd = weekday_from_index(i).unwrap();
            assert_eq!(weekday_index(wd), i);
        }
        assert_eq!(weekday_from_index(0), Some(Weekday::Sun));
        assert_eq!(weekday_from_index(7), None);
    }

    #[test]
    fn overnight_shift_fails_validation() {
        let shift = ShiftInterval::new("p", 1, 22 * 60, 6 * 60, None);
        assert!(matches!(
            shift.validate(),
            Err(RosterError::InvalidShift { .. })
        ));
    }

    #[test]
    fn zero_length_event_fails_validation() {
        let at = Utc.with_ymd_and_hms(2026, 3, 9, 9, 0, 0).unwrap();
        let event = Event::new("e", "p", "Blip", at, at, EventKind::Meeting);
        assert!(!event.is_valid());
    }

    #[test]
    fn all_day_flag_only_applies_to_leave() {
        let start = Utc.with_ymd_and_hms(2026, 3, 9, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 9, 10, 0, 0).unwrap();
        let mut meeting = Event::new("m", "p", "Sync", start, end, EventKind::Meeting);
        meeting.is_all_day = true;
        assert!(!meeting.is_all_day_leave());
        assert_eq!(meeting.effective_interval(chrono_tz::UTC), meeting.interval());
    }
}
