// Core layer - shared types, configuration, and errors
pub mod core;

// Features layer - schedule store/repository and reminder engine
pub mod features;

// Delivery layer - transport seam for outbound reminders
pub mod delivery;

// Application layer
pub mod commands;

// Re-export core config for convenience
pub use core::{Config, ScheduleError};

// Re-export feature items
pub use features::{Course, CourseRepository, ReminderScheduler, ScheduleStore, UserRecord};

// Re-export delivery seam
pub use delivery::{DeliveryChannel, DeliveryError, DeliveryGateway, DiscordGateway};
