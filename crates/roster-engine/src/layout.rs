//! Horizontal lane layout for overlapping events in a day column.
//!
//! Events are scanned in start order and chained into groups: an event joins
//! the open group when it overlaps any member, otherwise the group closes and a
//! new one begins. Every member of a group of `n` gets width `100 / n`.
//!
//! This is an approximation, not a minimum-width interval coloring. A group is
//! a connected component of the overlap graph in scan order, not a maximum
//! clique, so in a chain A-B-C where A and C don't overlap all three still get a
//! third of the width. Renderers depend on this grouping; changing it changes
//! what users see.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::Event;

/// Horizontal placement of one event, in percent of the column width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventLayout {
    pub left: f64,
    pub width: f64,
    pub lane_index: usize,
    pub lane_count: usize,
}

/// Assign a lane to every valid event, keyed by event id.
///
/// Sorting is by start, ties broken by id, so the result does not depend on
/// input order. Malformed events are skipped.
pub fn layout_events(events: &[Event]) -> HashMap<String, EventLayout> {
    let mut sorted: Vec<&Event> = events
        .iter()
        .filter(|e| match e.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "skipping malformed event in layout");
                false
            }
        })
        .collect();
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

    let mut layouts = HashMap::with_capacity(sorted.len());
    let mut group: Vec<&Event> = Vec::new();

    for event in sorted {
        let joins = group
            .iter()
            .any(|member| member.interval().overlaps(&event.interval()));
        if !joins && !group.is_empty() {
            assign_lanes(&group, &mut layouts);
            group.clear();
        }
        group.push(event);
    }
    if !group.is_empty() {
        assign_lanes(&group, &mut layouts);
    }

    layouts
}

fn assign_lanes(group: &[&Event], layouts: &mut HashMap<String, EventLayout>) {
    let lane_count = group.len();
    let width = 100.0 / lane_count as f64;
    for (lane_index, event) in group.iter().enumerate() {
        layouts.insert(
            event.id.clone(),
            EventLayout {
                left: lane_index as f64 * width,
                width,
                lane_index,
                lane_count,
            },
        );
    }
}
