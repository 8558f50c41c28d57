//! Auto-size the visible hour range of a day view.
//!
//! The window hugs the day's shifts and events with padding, never gets
//! narrower than the configured minimum span, and always contains the
//! configured default window.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::config::{CalendarConfig, DayWindow};
use crate::model::{EventsByProfile, Interval, ShiftsByProfile};
use crate::shift;
use crate::zone;

/// Compute the visible window for `date` in `tz`.
///
/// With no shift or event touching the date the configured default window is
/// returned verbatim. All-day leave doesn't size the window.
pub fn compute_day_window(
    date: NaiveDate,
    shifts: &ShiftsByProfile,
    events: &EventsByProfile,
    tz: Tz,
    config: &CalendarConfig,
) -> DayWindow {
    let default = config.default_window;
    let day = zone::day_bounds(date, tz).ok();

    let shift_spans = shifts
        .values()
        .flat_map(|list| shift::expand_shifts_touching(list, date, tz));
    let event_spans = events
        .values()
        .flatten()
        .filter(|e| e.is_valid() && !e.is_all_day_leave())
        .map(|e| e.interval())
        .filter(|interval| match &day {
            Some(day) => interval.overlaps(day),
            None => zone::local_date(interval.start, tz) == date,
        });

    let bounds: Vec<(f64, f64)> = shift_spans
        .chain(event_spans)
        .map(|Interval { start, end }| (hours_on(date, start, tz), hours_on(date, end, tz)))
        .collect();

    if bounds.is_empty() {
        return default;
    }

    let earliest = bounds.iter().map(|b| b.0).fold(f64::INFINITY, f64::min);
    let latest = bounds.iter().map(|b| b.1).fold(f64::NEG_INFINITY, f64::max);

    let pad = i64::from(config.padding_minutes.div_ceil(60));
    let mut start = (earliest.floor() as i64 - pad).max(0);
    let mut end = (latest.ceil() as i64 + pad).min(24);

    let min_span = i64::from(config.min_span_hours.min(24));
    if end - start < min_span {
        let center = (earliest + latest) / 2.0;
        start = ((center - min_span as f64 / 2.0).floor() as i64).max(0);
        end = (start + min_span).min(24);
        start = (end - min_span).max(0);
    }

    let window = DayWindow {
        start_hour: (start as u32).min(default.start_hour),
        end_hour: (end as u32).max(default.end_hour),
    };
    debug!(%date, earliest, latest, ?window, "day window");
    window
}

/// Local hours of `instant` measured on `date`: 0 if it falls on an earlier
/// day, 24 if on a later one.
fn hours_on(date: NaiveDate, instant: DateTime<Utc>, tz: Tz) -> f64 {
    let local = zone::local_date(instant, tz);
    if local < date {
        0.0
    } else if local > date {
        24.0
    } else {
        zone::local_hours(instant, tz)
    }
}
