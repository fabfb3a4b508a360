//! Mailbox configuration.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use super::strategy::OverflowStrategy;

/// Capacity sentinel used when a mailbox is configured as unbounded.
///
/// The underlying channel is created without a bound; the sentinel only
/// normalizes the `capacity` field so configuration stays comparable and
/// serializable.
pub const UNBOUNDED_CAPACITY: usize = 65_536;

/// Immutable mailbox configuration.
///
/// Setter-style methods return new instances so a config value can be shared
/// freely without defensive copies.
///
/// # Examples
///
/// ```rust
/// use cadre_rt::mailbox::{MailboxConfig, OverflowStrategy};
///
/// let config = MailboxConfig::bounded(64).with_strategy(OverflowStrategy::DropOldest);
/// assert!(config.bounded);
/// assert_eq!(config.capacity, 64);
///
/// let unbounded = MailboxConfig::unbounded();
/// assert!(!unbounded.bounded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailboxConfig {
    /// Whether the mailbox enforces a capacity limit.
    pub bounded: bool,

    /// Maximum resident envelopes for a bounded mailbox. For unbounded
    /// mailboxes the field holds [`UNBOUNDED_CAPACITY`].
    pub capacity: usize,

    /// How a full bounded mailbox treats an incoming envelope.
    pub strategy: OverflowStrategy,
}

impl MailboxConfig {
    /// Create a bounded configuration with the default overflow strategy.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            bounded: true,
            capacity,
            strategy: OverflowStrategy::default(),
        }
    }

    /// Create an unbounded configuration.
    pub fn unbounded() -> Self {
        Self {
            bounded: false,
            capacity: UNBOUNDED_CAPACITY,
            strategy: OverflowStrategy::default(),
        }
    }

    /// Return a copy of this configuration with a different overflow strategy.
    pub fn with_strategy(mut self, strategy: OverflowStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validate configuration values.
    ///
    /// Returns `Err` if a bounded mailbox has zero capacity.
    pub fn validate(&self) -> Result<(), String> {
        if self.bounded && self.capacity == 0 {
            return Err("capacity must be > 0 for a bounded mailbox".to_string());
        }
        Ok(())
    }
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self::bounded(crate::runtime::DEFAULT_MAILBOX_CAPACITY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_config() {
        let config = MailboxConfig::bounded(16);
        assert!(config.bounded);
        assert_eq!(config.capacity, 16);
        assert_eq!(config.strategy, OverflowStrategy::ThrowOnOverflow);
    }

    #[test]
    fn test_unbounded_uses_sentinel() {
        let config = MailboxConfig::unbounded();
        assert!(!config.bounded);
        assert!(config.capacity >= 65_536);
    }

    #[test]
    fn test_with_strategy_returns_new_instance() {
        let base = MailboxConfig::bounded(8);
        let dropping = base.with_strategy(OverflowStrategy::DropNewest);
        assert_eq!(base.strategy, OverflowStrategy::ThrowOnOverflow);
        assert_eq!(dropping.strategy, OverflowStrategy::DropNewest);
    }

    #[test]
    fn test_default_matches_runtime_default_capacity() {
        let config = MailboxConfig::default();
        assert!(config.bounded);
        assert_eq!(config.capacity, crate::runtime::DEFAULT_MAILBOX_CAPACITY);
    }

    #[test]
    fn test_validation_rejects_zero_capacity() {
        let invalid = MailboxConfig::bounded(0);
        let result = invalid.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("capacity"));
    }

    #[test]
    fn test_validation_accepts_unbounded() {
        assert!(MailboxConfig::unbounded().validate().is_ok());
    }

    #[test]
    fn test_serialization_json() {
        let config = MailboxConfig::bounded(32).with_strategy(OverflowStrategy::Backpressure);
        let json = serde_json::to_string(&config).unwrap();
        let back: MailboxConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
