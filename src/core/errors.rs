//! Domain error taxonomy for schedule operations
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the schedule store and course repository.
///
/// Validation errors are rendered as user-facing command responses;
/// [`ScheduleError::CorruptState`] is fatal at startup, and
/// [`ScheduleError::Io`] indicates a persistence failure that must be
/// surfaced loudly rather than swallowed.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("unrecognized weekday `{0}` — use Monday..Sunday (or Mon..Sun) or a number 1-7")]
    InvalidWeekday(String),

    #[error("invalid time `{0}` — expected 24-hour HH:MM, e.g. 08:00 or 14:30")]
    InvalidTimeFormat(String),

    #[error("course name cannot be empty")]
    EmptyName,

    #[error("course number {index} is out of range — you have {len} course(s)")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("could not parse the course payload: {0}")]
    MalformedPayload(String),

    #[error("schedule file {} exists but could not be parsed: {source}", path.display())]
    CorruptState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read or write schedule data: {0}")]
    Io(#[from] std::io::Error),
}

impl ScheduleError {
    /// Whether this error should be shown to the user as command response
    /// text instead of being propagated to the dispatcher.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidWeekday(_)
                | ScheduleError::InvalidTimeFormat(_)
                | ScheduleError::EmptyName
                | ScheduleError::IndexOutOfRange { .. }
                | ScheduleError::MalformedPayload(_)
        )
    }
}
