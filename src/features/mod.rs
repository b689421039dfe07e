//! # Features
//!
//! Feature modules for the coursebell bot.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod reminders;
pub mod schedule;

// Re-export feature items
pub use reminders::{DueReminder, ReminderScheduler};
pub use schedule::{Course, CourseRepository, ScheduleStore, UserRecord};
