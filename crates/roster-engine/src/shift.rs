//! Recurring shift expansion -- places a weekday-indexed shift onto a concrete date.
//!
//! A shift's minute-of-day fields are wall-clock time in the zone the shift was
//! authored in. Expansion materializes that wall-clock time on the target date
//! in the authored zone and converts it to absolute instants, which are then
//! correct to display in any zone.
//!
//! Shifts without an authored zone come from the legacy encoding, where the
//! minutes were stored as UTC on a fixed reference week. Those are re-zoned into
//! the display zone through [`expand_legacy`]. New data should always carry a
//! zone; the legacy path exists for records that predate it.
//!
//! Shifts never cross midnight, so a date yields at most one interval per shift.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::dst::DstPolicy;
use crate::model::{weekday_index, Event, EventKind, Interval, ShiftInterval};
use crate::zone;

/// Sunday (year, month, day) of the week legacy records are anchored to.
pub const LEGACY_REFERENCE_SUNDAY: (i32, u32, u32) = (1970, 1, 4);

/// The reference date a legacy shift for weekday `day_of_week` is stored on.
pub fn legacy_reference_date(day_of_week: u8) -> Option<NaiveDate> {
    let (y, m, d) = LEGACY_REFERENCE_SUNDAY;
    NaiveDate::from_ymd_opt(y, m, d)
        .map(|sunday| sunday + Duration::days(i64::from(day_of_week)))
}

/// Expand a shift onto `date`, viewed from the `display` zone.
///
/// Returns `None` when the date's weekday is not the shift's weekday, or when
/// the shift is malformed (logged and skipped).
pub fn expand_shift(shift: &ShiftInterval, date: NaiveDate, display: Tz) -> Option<Interval> {
    if let Err(err) = shift.validate() {
        warn!(%err, "skipping malformed shift");
        return None;
    }
    if weekday_index(date.weekday()) != shift.day_of_week {
        return None;
    }

    match shift.timezone.as_deref() {
        Some(name) => {
            let authored = zone::parse_zone(name).unwrap_or_else(|err| {
                warn!(%err, profile = %shift.profile_id, "shift zone unknown, using display zone");
                display
            });
            materialize(
                date,
                minute_to_time(shift.start_minute)?,
                minute_to_time(shift.end_minute)?,
                authored,
            )
        }
        None => expand_legacy(shift, date, display),
    }
}

/// Expand every shift in `shifts` onto `date`, dropping those that don't apply.
pub fn expand_shifts(shifts: &[ShiftInterval], date: NaiveDate, display: Tz) -> Vec<Interval> {
    shifts
        .iter()
        .filter_map(|s| expand_shift(s, date, display))
        .collect()
}

/// Expand every shift onto the days around `date` and keep the occurrences
/// that overlap the civil `date` in `display`.
///
/// A shift authored in another zone can land on the neighbouring display date,
/// so the day before and after are expanded too.
pub fn expand_shifts_touching(
    shifts: &[ShiftInterval],
    date: NaiveDate,
    display: Tz,
) -> Vec<Interval> {
    let Ok(day) = zone::day_bounds(date, display) else {
        return expand_shifts(shifts, date, display);
    };
    [date.pred_opt(), Some(date), date.succ_opt()]
        .into_iter()
        .flatten()
        .flat_map(|d| expand_shifts(shifts, d, display))
        .filter(|interval| interval.overlaps(&day))
        .collect()
}

/// The occurrence of `shift` that could contain `instant`.
///
/// The shift is expanded on the instant's civil date in the shift's own zone,
/// so the answer doesn't depend on which zone the caller views it from.
pub fn occurrence_at(
    shift: &ShiftInterval,
    instant: DateTime<Utc>,
    display: Tz,
) -> Option<Interval> {
    let anchor = shift
        .timezone
        .as_deref()
        .and_then(|name| zone::parse_zone(name).ok())
        .unwrap_or(display);
    expand_shift(shift, zone::local_date(instant, anchor), display)
}

/// Legacy shim: minutes are UTC on the reference week and re-zoned into `display`.
///
/// The re-zoning uses the display zone's offset on the reference date, not on
/// `date`, so these shifts do not follow DST. A shift whose re-zoned times wrap
/// past local midnight is dropped.
pub fn expand_legacy(shift: &ShiftInterval, date: NaiveDate, display: Tz) -> Option<Interval> {
    let reference = legacy_reference_date(shift.day_of_week)?;
    let rezone = |minute: u16| -> Option<NaiveTime> {
        let utc = reference.and_time(minute_to_time(minute)?).and_utc();
        Some(utc.with_timezone(&display).time())
    };
    let start = rezone(shift.start_minute)?;
    let end = rezone(shift.end_minute)?;
    if end <= start {
        debug!(
            profile = %shift.profile_id,
            %start,
            %end,
            "legacy shift wraps midnight in display zone, dropped"
        );
        return None;
    }
    materialize(date, start, end, display)
}

fn materialize(date: NaiveDate, start: NaiveTime, end: NaiveTime, tz: Tz) -> Option<Interval> {
    let start = zone::localize(date.and_time(start), tz, DstPolicy::ShiftForward).ok()?;
    let end = zone::localize(date.and_time(end), tz, DstPolicy::ShiftForward).ok()?;
    // Both ends inside one spring-forward gap collapse to nothing.
    (start < end).then_some(Interval { start, end })
}

fn minute_to_time(minute: u16) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(u32::from(minute / 60), u32::from(minute % 60), 0)
}

/// Convert a legacy recurring `WorkingHours` event into zone-less shifts.
///
/// The event's UTC time-of-day becomes the shift minutes. One shift is produced
/// per weekday of the recurrence pattern, falling back to the recurrence's
/// `day_of_week` and then to the weekday of the stored start. Events of other
/// kinds, or whose stored span crosses UTC midnight, produce nothing.
pub fn shifts_from_legacy_event(event: &Event) -> Vec<ShiftInterval> {
    if event.kind != EventKind::WorkingHours {
        return Vec::new();
    }
    if let Err(err) = event.validate() {
        warn!(%err, "skipping malformed legacy working-hours event");
        return Vec::new();
    }
    if event.start.date_naive() != event.end.date_naive() {
        warn!(id = %event.id, "legacy working-hours event crosses midnight, skipped");
        return Vec::new();
    }

    let to_minute = |t: NaiveTime| (t.hour() * 60 + t.minute()) as u16;
    let start_minute = to_minute(event.start.time());
    let end_minute = to_minute(event.end.time());

    let days: Vec<u8> = match &event.recurrence {
        Some(r) if !r.pattern.is_empty() => r.pattern.clone(),
        Some(r) => vec![r.day_of_week],
        None => vec![weekday_index(event.start.weekday())],
    };

    days.into_iter()
        .map(|day| ShiftInterval {
            profile_id: event.profile_id.clone(),
            day_of_week: day,
            start_minute,
            end_minute,
            timezone: None,
        })
        .filter(|s| match s.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "legacy event produced an invalid shift");
                false
            }
        })
        .collect()
}
