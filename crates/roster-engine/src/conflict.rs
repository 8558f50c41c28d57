//! Detect overlapping events within one staff member's schedule.
//!
//! Two events conflict when their intervals overlap under the open test
//! `a.start < b.end && b.start < a.end`. Adjacent events (where one ends exactly
//! when another starts) are NOT conflicts.

use serde::{Deserialize, Serialize};

use crate::model::Event;

/// A detected conflict between two events of the same profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub event_a: Event,
    pub event_b: Event,
    pub overlap_minutes: i64,
}

/// Whether `event` overlaps any event in `others`.
///
/// `others` may contain `event` itself; it is skipped by `id`. Returns on the
/// first overlap found.
pub fn has_conflict(event: &Event, others: &[Event]) -> bool {
    if !event.is_valid() {
        return false;
    }
    others
        .iter()
        .filter(|other| other.id != event.id && other.is_valid())
        .any(|other| event.interval().overlaps(&other.interval()))
}

/// Find all pairwise conflicts among `events`, per profile.
///
/// Events of different profiles never conflict with each other. The overlap
/// duration is `min(a.end, b.end) - max(a.start, b.start)`. Results are ordered
/// by the start of `event_a`, with `event_a` always the earlier-starting event.
pub fn find_conflicts(events: &[Event]) -> Vec<Conflict> {
    let mut sorted: Vec<&Event> = events.iter().filter(|e| e.is_valid()).collect();
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

    let mut conflicts = Vec::new();
    for (idx, a) in sorted.iter().enumerate() {
        for b in sorted.iter().skip(idx + 1) {
            // Sorted by start: nothing later can overlap `a` either.
            if b.start >= a.end {
                break;
            }
            if a.profile_id != b.profile_id || a.id == b.id {
                continue;
            }
            let overlap_start = a.start.max(b.start);
            let overlap_end = a.end.min(b.end);
            conflicts.push(Conflict {
                event_a: (*a).clone(),
                event_b: (*b).clone(),
                overlap_minutes: (overlap_end - overlap_start).num_minutes(),
            });
        }
    }

    conflicts
}
