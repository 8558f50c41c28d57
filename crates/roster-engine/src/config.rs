//! Calendar configuration threaded explicitly into every computation.
//!
//! Nothing in the engine reads ambient state: the fallback zone, the day
//! window baseline and its padding all come from a [`CalendarConfig`] value
//! supplied by the caller.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};
use crate::zone;

pub const DEFAULT_TIMEZONE: &str = "Australia/Sydney";

/// A visible range of whole hours, `start_hour..end_hour`, within [0, 24].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl DayWindow {
    pub const fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn span(&self) -> u32 {
        self.end_hour.saturating_sub(self.start_hour)
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        Self::new(6, 20)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Zone used when a caller's zone is unset or unknown.
    pub default_timezone: String,
    /// Padding added on both sides of the day's data, rounded up to whole hours.
    pub padding_minutes: u32,
    /// Baseline window that is always visible when data exists, and returned
    /// verbatim when it doesn't.
    pub default_window: DayWindow,
    pub min_span_hours: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            default_timezone: DEFAULT_TIMEZONE.to_string(),
            padding_minutes: 60,
            default_window: DayWindow::default(),
            min_span_hours: 8,
        }
    }
}

impl CalendarConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CalendarConfig =
            serde_json::from_str(json).map_err(|e| RosterError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        zone::parse_zone(&self.default_timezone)
            .map_err(|e| RosterError::InvalidConfig(e.to_string()))?;
        let w = self.default_window;
        if w.start_hour >= w.end_hour || w.end_hour > 24 {
            return Err(RosterError::InvalidConfig(format!(
                "default window {}..{} must satisfy start < end <= 24",
                w.start_hour, w.end_hour
            )));
        }
        if self.min_span_hours > 24 {
            return Err(RosterError::InvalidConfig(format!(
                "min_span_hours {} exceeds a day",
                self.min_span_hours
            )));
        }
        Ok(())
    }

    /// The configured fallback zone. An unparseable configured name degrades to UTC.
    pub fn default_zone(&self) -> Tz {
        zone::parse_zone(&self.default_timezone).unwrap_or_else(|_| {
            tracing::warn!(
                zone = %self.default_timezone,
                "configured default timezone is unknown, using UTC"
            );
            chrono_tz::UTC
        })
    }

    /// Parse `name`, substituting the default zone when it is unset or unknown.
    pub fn resolve_zone(&self, name: Option<&str>) -> Tz {
        match name {
            None => self.default_zone(),
            Some(name) => zone::parse_zone(name).unwrap_or_else(|err| {
                tracing::warn!(
                    %err,
                    fallback = %self.default_timezone,
                    "falling back to default timezone"
                );
                self.default_zone()
            }),
        }
    }
}
