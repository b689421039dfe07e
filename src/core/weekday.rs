//! Weekday token parsing and display
//!
//! Courses are keyed on ISO weekday numbers (1 = Monday .. 7 = Sunday).
//! User input accepts either a numeric literal or an English weekday name.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::Weekday;

use super::errors::ScheduleError;

/// Resolve a user-supplied weekday token to an ISO weekday number.
///
/// Accepts `"1"`..`"7"` or an English weekday name (full or three-letter,
/// case-insensitive). Anything else is an [`ScheduleError::InvalidWeekday`].
pub fn parse_weekday(token: &str) -> Result<u8, ScheduleError> {
    let trimmed = token.trim();

    if let Ok(n) = trimmed.parse::<u8>() {
        if (1..=7).contains(&n) {
            return Ok(n);
        }
        return Err(ScheduleError::InvalidWeekday(token.to_string()));
    }

    // chrono's FromStr accepts "monday" / "mon" etc., case-insensitive
    trimmed
        .parse::<Weekday>()
        .map(|w| w.number_from_monday() as u8)
        .map_err(|_| ScheduleError::InvalidWeekday(token.to_string()))
}

/// Display name for an ISO weekday number.
pub fn weekday_name(day: u8) -> &'static str {
    match day {
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        7 => "Sunday",
        _ => "?",
    }
}
