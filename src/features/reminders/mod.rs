//! # Reminders Feature
//!
//! Periodic scanner that fires course notifications through the delivery
//! gateway thirty minutes before each scheduled occurrence.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod scheduler;

pub use scheduler::{due_reminders, DueReminder, ReminderScheduler};
