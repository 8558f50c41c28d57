//! Weekly recurrence -- every occurrence of a shift across a date range.
//!
//! The weekly pattern is expanded as an RFC 5545 rule (`FREQ=WEEKLY;BYDAY=..`)
//! through the `rrule` crate to get the civil dates, and each date is then
//! materialized with [`expand_shift`](crate::shift::expand_shift) so DST and the
//! legacy shim behave exactly as they do for a single day.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use chrono_tz::Tz;
use rrule::RRuleSet;

use crate::error::{Result, RosterError};
use crate::model::{weekday_index, Interval, ShiftInterval};
use crate::shift;

/// Expand `shift` into concrete intervals for every matching date in
/// `from..=to`, in date order.
///
/// An empty or reversed range yields an empty list.
///
/// # Errors
/// Returns `RosterError::InvalidShift` for a malformed shift and
/// `RosterError::InvalidRecurrence` if the range spans more weeks than can be
/// expanded in one call.
pub fn shift_occurrences(
    shift: &ShiftInterval,
    from: NaiveDate,
    to: NaiveDate,
    display: Tz,
) -> Result<Vec<Interval>> {
    shift.validate()?;
    if to < from {
        return Ok(Vec::new());
    }

    // First matching weekday on or after `from`.
    let ahead = (7 + i64::from(shift.day_of_week) - i64::from(weekday_index(from.weekday()))) % 7;
    let first = from + Duration::days(ahead);
    if first > to {
        return Ok(Vec::new());
    }
    let count = (to - first).num_days() / 7 + 1;
    let limit = u16::try_from(count)
        .map_err(|_| RosterError::InvalidRecurrence(format!("{} weeks is too many", count)))?;

    let weekday = shift.weekday().ok_or_else(|| {
        RosterError::InvalidRecurrence(format!("day_of_week {}", shift.day_of_week))
    })?;

    // Only civil dates come out of the rule, so it runs in UTC at noon where no
    // zone transition can interfere.
    let rrule_text = format!(
        "DTSTART;TZID=UTC:{}\nRRULE:FREQ=WEEKLY;BYDAY={};COUNT={}",
        first.format("%Y%m%dT120000"),
        byday(weekday),
        limit
    );
    let rrule_set: RRuleSet = rrule_text
        .parse()
        .map_err(|e| RosterError::InvalidRecurrence(format!("{}", e)))?;

    let occurrences = rrule_set
        .all(limit)
        .dates
        .into_iter()
        .map(|dt| dt.date_naive())
        .filter(|date| *date <= to)
        .filter_map(|date| shift::expand_shift(shift, date, display))
        .collect();

    Ok(occurrences)
}

fn byday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}
