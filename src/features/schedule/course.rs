//! Course and user record data model
//!
//! Field names mirror the durable JSON layout exactly, so these types
//! serialize straight into the schedule file without renames.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::core::errors::ScheduleError;

/// One weekly-recurring course entry.
///
/// Duplicate `(day, time)` entries are allowed and fire independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// ISO weekday, 1 = Monday .. 7 = Sunday
    pub day: u8,
    /// Zero-padded 24-hour wall-clock time, e.g. "14:30"
    pub time: String,
    /// Display label for the course
    pub name: String,
    /// Free-text location label
    pub location: String,
}

/// One user's full schedule state, including the delivery context the
/// reminder engine needs to reach them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Opaque delivery transport identifier (e.g. "discord")
    pub provider_id: String,
    /// Destination within the transport (channel or DM id)
    pub conversation_id: String,
    /// Courses, kept sorted by (day, time) after every mutation
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl UserRecord {
    /// Restore the canonical `(day, time)` ordering.
    ///
    /// The sort is stable, so equal entries keep their insertion order.
    pub fn sort_courses(&mut self) {
        self.courses
            .sort_by(|a, b| (a.day, a.time.as_str()).cmp(&(b.day, b.time.as_str())));
    }

    /// A record can only be notified when both delivery fields are set.
    pub fn can_notify(&self) -> bool {
        !self.provider_id.is_empty() && !self.conversation_id.is_empty()
    }
}

/// Validate a strict zero-padded `HH:MM` time label.
///
/// The reminder engine compares these labels against a formatted clock
/// reading by exact string equality, so anything that is not exactly five
/// characters of valid 24-hour time is rejected.
pub fn validate_time(time: &str) -> Result<(), ScheduleError> {
    let bytes = time.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && NaiveTime::parse_from_str(time, "%H:%M").is_ok();

    if well_formed {
        Ok(())
    } else {
        Err(ScheduleError::InvalidTimeFormat(time.to_string()))
    }
}
