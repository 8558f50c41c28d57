//! # roster-engine
//!
//! Timezone-aware scheduling computations for a staff rostering calendar.
//!
//! Every function here is pure and synchronous: callers hand in snapshots of
//! recurring weekly shifts and UTC-stamped events, and get back derived views.
//! Comparisons happen on absolute instants; wall-clock arithmetic is confined
//! to the [`zone`] module.
//!
//! ## Modules
//!
//! - [`zone`] — instant ⇄ civil wall-clock fields in an IANA zone
//! - [`dst`] — DST gap policies for wall-clock times
//! - [`shift`] — weekday-indexed shift → concrete interval on a date
//! - [`recurrence`] — shift occurrences across a date range
//! - [`status`] — working / busy / off at an instant
//! - [`conflict`] — overlapping events within a profile
//! - [`layout`] — side-by-side lanes for overlapping events
//! - [`change_point`] — next instant at which a status changes
//! - [`day_window`] — visible hour range for a day view
//! - [`config`] — default zone and day-window settings
//! - [`error`] — Error types

pub mod change_point;
pub mod config;
pub mod conflict;
pub mod day_window;
pub mod dst;
pub mod error;
pub mod layout;
pub mod model;
pub mod recurrence;
pub mod shift;
pub mod status;
pub mod zone;

pub use change_point::next_change;
pub use config::{CalendarConfig, DayWindow};
pub use conflict::{find_conflicts, has_conflict, Conflict};
pub use day_window::compute_day_window;
pub use error::RosterError;
pub use layout::{layout_events, EventLayout};
pub use model::{
    group_by_profile, Event, EventKind, EventsByProfile, Interval, ShiftInterval,
    ShiftsByProfile, Status, StatusInfo,
};
pub use recurrence::shift_occurrences;
pub use shift::{expand_shift, shifts_from_legacy_event};
pub use status::compute_status;
pub use zone::{from_zoned, to_zoned, CivilFields};
