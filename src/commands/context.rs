//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::features::schedule::CourseRepository;

/// Shared context for all command handlers.
///
/// Holds the course repository, which is the only service the schedule
/// commands need.
#[derive(Clone)]
pub struct CommandContext {
    pub repository: CourseRepository,
}

impl CommandContext {
    pub fn new(repository: CourseRepository) -> Self {
        Self { repository }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        // CommandContext should be Clone for sharing across handlers
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }
}
