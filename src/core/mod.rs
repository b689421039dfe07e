//! # Core Module
//!
//! Core domain types, configuration, and error handling for the coursebell bot.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod config;
pub mod errors;
pub mod weekday;

// Re-export commonly used items
pub use config::Config;
pub use errors::ScheduleError;
pub use weekday::{parse_weekday, weekday_name};
