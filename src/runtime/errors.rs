//! Runtime-level error types.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Errors surfaced by runtime lifecycle operations.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// `run` was called while a scheduler pass was already active.
    #[error("scheduler is already running")]
    AlreadyRunning,

    /// The advisory task ceiling was reached.
    #[error("task limit exceeded: current {current}, max {max}")]
    TaskLimitExceeded { current: usize, max: usize },

    /// The host scheduler could not be constructed.
    #[error("failed to start scheduler: {0}")]
    SchedulerStart(#[from] std::io::Error),
}

impl RuntimeError {
    /// Check if the error is fatal for the current scheduler pass.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SchedulerStart(_))
    }

    /// Check if the error can be handled without stopping the runtime.
    pub fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_running_display() {
        let err = RuntimeError::AlreadyRunning;
        assert_eq!(err.to_string(), "scheduler is already running");
    }

    #[test]
    fn test_task_limit_display() {
        let err = RuntimeError::TaskLimitExceeded {
            current: 10,
            max: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains('5'));
    }

    #[test]
    fn test_scheduler_start_from_io_error() {
        let io = std::io::Error::other("driver unavailable");
        let err: RuntimeError = io.into();
        assert!(matches!(err, RuntimeError::SchedulerStart(_)));
        assert!(err.is_fatal());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_classification() {
        assert!(RuntimeError::AlreadyRunning.is_recoverable());
        let limit = RuntimeError::TaskLimitExceeded { current: 1, max: 1 };
        assert!(limit.is_recoverable());
        assert!(!limit.is_fatal());
    }
}
