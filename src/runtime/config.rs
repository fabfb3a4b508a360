//! Runtime configuration with sensible defaults.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// Default capacity handed to mailboxes created without an explicit config.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 1000;

/// Default setting for the scheduler's I/O driver.
pub const DEFAULT_ENABLE_IO_DRIVER: bool = true;

/// Default advisory ceiling on concurrently tracked tasks.
pub const DEFAULT_MAX_TASKS: usize = 100_000;

/// Immutable runtime configuration.
///
/// Setter-style methods return new instances, so a config can be threaded
/// through builders without interior mutability.
///
/// # Examples
///
/// ```rust
/// use cadre_rt::runtime::{RuntimeConfig, DEFAULT_MAILBOX_CAPACITY};
///
/// let config = RuntimeConfig::default();
/// assert_eq!(config.default_mailbox_capacity, DEFAULT_MAILBOX_CAPACITY);
///
/// let custom = config.with_default_mailbox_capacity(500).with_max_tasks(64);
/// assert_eq!(custom.default_mailbox_capacity, 500);
/// assert_eq!(custom.max_tasks, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Capacity for mailboxes created through `create_default_mailbox`.
    pub default_mailbox_capacity: usize,

    /// Whether the scheduler enables its I/O driver, letting tasks drive
    /// sockets and pipes through the cooperative reactor.
    pub enable_io_driver: bool,

    /// Ceiling on concurrently tracked tasks, enforced at spawn.
    /// Zero disables the check.
    pub max_tasks: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            enable_io_driver: DEFAULT_ENABLE_IO_DRIVER,
            max_tasks: DEFAULT_MAX_TASKS,
        }
    }
}

impl RuntimeConfig {
    /// Return a copy with a different default mailbox capacity.
    pub fn with_default_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.default_mailbox_capacity = capacity;
        self
    }

    /// Return a copy with the I/O driver enabled or disabled.
    pub fn with_io_driver(mut self, enabled: bool) -> Self {
        self.enable_io_driver = enabled;
        self
    }

    /// Return a copy with a different task ceiling (0 = unlimited).
    pub fn with_max_tasks(mut self, max: usize) -> Self {
        self.max_tasks = max;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_mailbox_capacity == 0 {
            return Err("default_mailbox_capacity must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        assert_eq!(config.default_mailbox_capacity, 1000);
        assert!(config.enable_io_driver);
        assert_eq!(config.max_tasks, 100_000);
    }

    #[test]
    fn test_setters_return_new_instances() {
        let base = RuntimeConfig::default();
        let custom = base
            .with_default_mailbox_capacity(10)
            .with_io_driver(false)
            .with_max_tasks(5);

        assert_eq!(base.default_mailbox_capacity, 1000);
        assert_eq!(custom.default_mailbox_capacity, 10);
        assert!(!custom.enable_io_driver);
        assert_eq!(custom.max_tasks, 5);
    }

    #[test]
    fn test_validation_rejects_zero_capacity() {
        let invalid = RuntimeConfig::default().with_default_mailbox_capacity(0);
        let result = invalid.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("mailbox_capacity"));
    }

    #[test]
    fn test_serialization_json() {
        let config = RuntimeConfig::default().with_max_tasks(99);
        let json = serde_json::to_string(&config).unwrap();
        let back: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
