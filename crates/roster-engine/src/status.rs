//! Point-in-time status of a staff member: busy, working, or off.
//!
//! Events take priority over shifts. Event containment is open on both ends so
//! back-to-back events never both claim their shared boundary; shift
//! containment is half-open, so a shift ending at 17:00 is off at 17:00.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::model::{Event, EventKind, ShiftInterval, Status, StatusInfo};
use crate::shift;

/// Compute the status of `profile_id` at `instant`, viewed in `tz`.
///
/// 1. `Busy` when a non-working-hours event strictly contains the instant. The
///    first such event in input order is reported as `current_event`.
/// 2. `Working` when one of the profile's shifts, expanded onto the instant's
///    civil date in the shift's own zone, contains it; or when a
///    `WorkingHours` event does.
/// 3. `Off` otherwise.
///
/// Records for other profiles and malformed records are ignored.
pub fn compute_status(
    profile_id: &str,
    instant: DateTime<Utc>,
    tz: Tz,
    shifts: &[ShiftInterval],
    events: &[Event],
) -> StatusInfo {
    let own_events: Vec<&Event> = events
        .iter()
        .filter(|e| e.profile_id == profile_id)
        .filter(|e| match e.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "skipping malformed event");
                false
            }
        })
        .collect();

    if let Some(event) = own_events
        .iter()
        .filter(|e| e.kind != EventKind::WorkingHours)
        .find(|e| e.effective_interval(tz).strictly_contains(instant))
    {
        debug!(profile = profile_id, event = %event.id, "busy");
        return StatusInfo {
            status: Status::Busy,
            current_event: Some((*event).clone()),
        };
    }

    let on_shift = shifts
        .iter()
        .filter(|s| s.profile_id == profile_id)
        .filter_map(|s| shift::occurrence_at(s, instant, tz))
        .any(|interval| interval.contains(instant));
    let in_working_hours = own_events
        .iter()
        .filter(|e| e.kind == EventKind::WorkingHours)
        .any(|e| e.interval().contains(instant));

    if on_shift || in_working_hours {
        return StatusInfo {
            status: Status::Working,
            current_event: None,
        };
    }

    StatusInfo::off()
}
