//! WASM bindings for roster-engine.
//!
//! Exposes status, conflict detection, lane layout, change points and the day
//! window to the calendar UI via `wasm-bindgen`. All complex types cross the
//! boundary as JSON strings; errors come back as `JsValue` strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p roster-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/roster-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/roster_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use roster_engine::{CalendarConfig, Event, EventsByProfile, ShiftInterval, ShiftsByProfile};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct IntervalDto {
    start: String,
    end: String,
}

#[derive(Serialize)]
struct NextChangeDto {
    next_change: Option<String>,
}

/// A day's roster as handed over by the UI: flat lists, grouped here by profile.
#[derive(Deserialize)]
struct DayInput {
    #[serde(default)]
    shifts: Vec<ShiftInterval>,
    #[serde(default)]
    events: Vec<Event>,
}

impl DayInput {
    fn shifts_by_profile(&self) -> ShiftsByProfile {
        roster_engine::group_by_profile(&self.shifts)
    }

    fn events_by_profile(&self) -> EventsByProfile {
        roster_engine::group_by_profile(&self.events)
    }
}

// ---------------------------------------------------------------------------
// Helpers: parsing and serialization
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with offset, e.g. "2026-03-09T10:15:00+11:00") and
/// naive datetimes (e.g. "2026-03-08T23:15:00"), which are taken as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn parse_json<'a, T: Deserialize<'a>>(json: &'a str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

/// Parse an optional config; an empty string means the defaults.
fn parse_config(json: &str) -> Result<CalendarConfig, JsValue> {
    if json.trim().is_empty() {
        return Ok(CalendarConfig::default());
    }
    CalendarConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Status of one profile at an instant.
///
/// `shifts_json` / `events_json` are JSON arrays of shifts and events. An
/// unknown `timezone` falls back to the configured default zone. Returns
/// `{status, current_event}`.
#[wasm_bindgen(js_name = "computeStatus")]
pub fn compute_status(
    profile_id: &str,
    instant: &str,
    timezone: &str,
    shifts_json: &str,
    events_json: &str,
    config_json: &str,
) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    let tz = config.resolve_zone(Some(timezone));
    let shifts: Vec<ShiftInterval> = parse_json(shifts_json, "shifts")?;
    let events: Vec<Event> = parse_json(events_json, "events")?;
    let at = parse_datetime(instant)?;

    let info = roster_engine::compute_status(profile_id, at, tz, &shifts, &events);
    to_json(&info)
}

/// Whether `event_json` overlaps any event in `others_json`.
#[wasm_bindgen(js_name = "hasConflict")]
pub fn has_conflict(event_json: &str, others_json: &str) -> Result<bool, JsValue> {
    let event: Event = parse_json(event_json, "event")?;
    let others: Vec<Event> = parse_json(others_json, "events")?;
    Ok(roster_engine::has_conflict(&event, &others))
}

/// Every overlapping pair per profile, as `{event_a, event_b, overlap_minutes}`.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(events_json: &str) -> Result<String, JsValue> {
    let events: Vec<Event> = parse_json(events_json, "events")?;
    to_json(&roster_engine::find_conflicts(&events))
}

/// Lane layout keyed by event id: `{id: {left, width, lane_index, lane_count}}`.
#[wasm_bindgen(js_name = "layoutEvents")]
pub fn layout_events(events_json: &str) -> Result<String, JsValue> {
    let events: Vec<Event> = parse_json(events_json, "events")?;
    to_json(&roster_engine::layout_events(&events))
}

/// Next status change on `date` after `now`, as `{next_change: string | null}`.
///
/// `day_json` is `{shifts: [...], events: [...]}`.
#[wasm_bindgen(js_name = "nextChange")]
pub fn next_change(
    date: &str,
    day_json: &str,
    timezone: &str,
    now: &str,
    config_json: &str,
) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    let tz = config.resolve_zone(Some(timezone));
    let day: DayInput = parse_json(day_json, "day")?;
    let next = roster_engine::next_change(
        parse_date(date)?,
        &day.shifts_by_profile(),
        &day.events_by_profile(),
        tz,
        parse_datetime(now)?,
    );
    to_json(&NextChangeDto {
        next_change: next.map(|dt| dt.to_rfc3339()),
    })
}

/// Visible hour window for `date`, as `{start_hour, end_hour}`.
#[wasm_bindgen(js_name = "computeDayWindow")]
pub fn compute_day_window(
    date: &str,
    day_json: &str,
    timezone: &str,
    config_json: &str,
) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    let tz = config.resolve_zone(Some(timezone));
    let day: DayInput = parse_json(day_json, "day")?;
    let window = roster_engine::compute_day_window(
        parse_date(date)?,
        &day.shifts_by_profile(),
        &day.events_by_profile(),
        tz,
        &config,
    );
    to_json(&window)
}

/// One shift placed on `date`, as `{start, end}` or `null` when it doesn't apply.
#[wasm_bindgen(js_name = "expandShift")]
pub fn expand_shift(
    shift_json: &str,
    date: &str,
    timezone: &str,
    config_json: &str,
) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    let tz = config.resolve_zone(Some(timezone));
    let shift: ShiftInterval = parse_json(shift_json, "shift")?;
    let interval =
        roster_engine::expand_shift(&shift, parse_date(date)?, tz).map(|i| IntervalDto {
            start: i.start.to_rfc3339(),
            end: i.end.to_rfc3339(),
        });
    to_json(&interval)
}
