//! Find the next instant at which anyone's status may change.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::model::{EventsByProfile, ShiftsByProfile};
use crate::shift;
use crate::zone;

/// Earliest candidate instant strictly after `now`, or `None`.
///
/// Candidates are the start and end of every shift occurrence overlapping
/// `date`, plus each event start or end whose civil date in `tz` is `date`.
/// All-day leave contributes the bounds of its civil day. Malformed records
/// are skipped.
pub fn next_change(
    date: NaiveDate,
    shifts: &ShiftsByProfile,
    events: &EventsByProfile,
    tz: Tz,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let shift_points = shifts
        .values()
        .flat_map(|list| shift::expand_shifts_touching(list, date, tz))
        .flat_map(|interval| [interval.start, interval.end]);

    let event_points = events
        .values()
        .flatten()
        .filter(|e| e.is_valid())
        .map(|e| e.effective_interval(tz))
        .flat_map(|interval| [interval.start, interval.end])
        .filter(|instant| zone::local_date(*instant, tz) == date);

    let next = shift_points
        .chain(event_points)
        .filter(|instant| *instant > now)
        .min();
    tracing::debug!(%date, ?next, "next status change");
    next
}
