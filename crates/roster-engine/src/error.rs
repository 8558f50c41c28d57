//! Error types for roster-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid civil time: {0}")]
    InvalidCivilTime(String),

    #[error("Local time does not exist: {0}")]
    NonexistentLocalTime(String),

    #[error("Invalid shift for profile '{profile_id}': {message}")]
    InvalidShift { profile_id: String, message: String },

    #[error("Invalid event '{id}': {message}")]
    InvalidEvent { id: String, message: String },

    #[error("Invalid recurrence: {0}")]
    InvalidRecurrence(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
