//! Conversion between absolute instants and civil wall-clock fields.
//!
//! This module is the only place where wall-clock arithmetic happens. Every
//! other module compares `DateTime<Utc>` values and crosses into a zone through
//! the functions here, so DST offsets are always taken for the specific date
//! involved rather than assumed fixed.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone,
    Timelike, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;
use crate::error::{Result, RosterError};
use crate::model::Interval;

/// Wall-clock fields of an instant as seen in some zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl CivilFields {
    /// The naive datetime these fields describe, or `InvalidCivilTime` when a
    /// field is out of range (month 13, Feb 30, minute 60, ...).
    pub fn to_naive(&self) -> Result<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|d| d.and_hms_opt(self.hour, self.minute, 0))
            .ok_or_else(|| RosterError::InvalidCivilTime(self.to_string()))
    }

    pub fn from_naive(naive: NaiveDateTime) -> Self {
        Self {
            year: naive.year(),
            month: naive.month(),
            day: naive.day(),
            hour: naive.hour(),
            minute: naive.minute(),
        }
    }
}

impl std::fmt::Display for CivilFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

/// Parse an IANA zone name (e.g. "Australia/Sydney").
///
/// # Errors
/// Returns `RosterError::InvalidTimezone` if the name is not in the tz database.
pub fn parse_zone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| RosterError::InvalidTimezone(name.to_string()))
}

/// Civil fields of `instant` in the named zone.
pub fn to_zoned(instant: DateTime<Utc>, zone: &str) -> Result<CivilFields> {
    Ok(to_civil(instant, parse_zone(zone)?))
}

/// Absolute instant of a wall-clock time in the named zone.
///
/// Gap times are shifted forward (see [`DstPolicy::ShiftForward`]); ambiguous
/// times resolve to the earlier instant.
pub fn from_zoned(civil: CivilFields, zone: &str) -> Result<DateTime<Utc>> {
    from_civil(civil, parse_zone(zone)?, DstPolicy::default())
}

pub fn to_civil(instant: DateTime<Utc>, tz: Tz) -> CivilFields {
    CivilFields::from_naive(instant.with_timezone(&tz).naive_local())
}

pub fn from_civil(civil: CivilFields, tz: Tz, policy: DstPolicy) -> Result<DateTime<Utc>> {
    localize(civil.to_naive()?, tz, policy)
}

/// Resolve a naive wall-clock datetime in `tz` to an absolute instant.
pub fn localize(naive: NaiveDateTime, tz: Tz, policy: DstPolicy) -> Result<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => match policy {
            DstPolicy::Reject => Err(RosterError::NonexistentLocalTime(format!(
                "{} in {}",
                naive, tz
            ))),
            DstPolicy::ShiftForward => {
                // Apply the offset that was in force before the transition; the
                // result lands past the gap by exactly the gap length.
                let before = naive - Duration::days(1);
                let offset = match tz.from_local_datetime(&before) {
                    LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                        dt.offset().fix().local_minus_utc()
                    }
                    LocalResult::None => {
                        return Err(RosterError::NonexistentLocalTime(format!(
                            "{} in {}",
                            naive, tz
                        )))
                    }
                };
                let utc = naive - Duration::seconds(i64::from(offset));
                Ok(Utc.from_utc_datetime(&utc))
            }
        },
    }
}

/// Civil date of `instant` in `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Fractional hours since local midnight of `instant` in `tz` (09:30 -> 9.5).
pub fn local_hours(instant: DateTime<Utc>, tz: Tz) -> f64 {
    let local = instant.with_timezone(&tz);
    f64::from(local.hour())
        + f64::from(local.minute()) / 60.0
        + f64::from(local.second()) / 3600.0
}

/// The absolute span of a civil day in `tz`: from local midnight to the next
/// local midnight. The span is 23 or 25 hours long on transition days.
pub fn day_bounds(date: NaiveDate, tz: Tz) -> Result<Interval> {
    let next = date
        .succ_opt()
        .ok_or_else(|| RosterError::InvalidCivilTime(format!("no day after {}", date)))?;
    let start = localize(date.and_time(chrono::NaiveTime::MIN), tz, DstPolicy::ShiftForward)?;
    let end = localize(next.and_time(chrono::NaiveTime::MIN), tz, DstPolicy::ShiftForward)?;
    Ok(Interval { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn civil_fields_display_is_iso_like() {
        let civil = CivilFields {
            year: 2026,
            month: 3,
            day: 9,
            hour: 7,
            minute: 5,
        };
        assert_eq!(civil.to_string(), "2026-03-09T07:05");
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        let civil = CivilFields {
            year: 2026,
            month: 2,
            day: 30,
            hour: 9,
            minute: 0,
        };
        assert!(matches!(
            civil.to_naive(),
            Err(RosterError::InvalidCivilTime(_))
        ));
    }
}
