//! # Schedule Feature
//!
//! Durable multi-user course schedules: data model, JSON-backed store,
//! and the CRUD repository the reminder engine reads from.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod course;
pub mod repository;
pub mod store;

pub use course::{validate_time, Course, UserRecord};
pub use repository::CourseRepository;
pub use store::ScheduleStore;
