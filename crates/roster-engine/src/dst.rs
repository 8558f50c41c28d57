//! DST transition policies for wall-clock times.

/// Policy for resolving wall-clock times that fall inside a DST transition.
///
/// Ambiguous times (the repeated hour when clocks fall back) always resolve to
/// the earlier instant; the policy only decides what happens in the gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DstPolicy {
    /// Move a time inside the spring-forward gap forward by the gap length
    /// (02:30 during a 02:00 -> 03:00 jump becomes 03:30).
    #[default]
    ShiftForward,
    /// Fail with `RosterError::NonexistentLocalTime`.
    Reject,
}
