//! Mailbox error types.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use super::strategy::OverflowStrategy;

/// Errors surfaced by mailbox operations.
///
/// All variants are reported synchronously at the call that provoked them;
/// the mailbox never retries internally. Overflow-policy outcomes (`Dropped`,
/// `Backpressured`) are ordinary [`super::EnqueueResult`] values, not errors.
///
/// # Examples
///
/// ```rust
/// use cadre_rt::mailbox::{MailboxError, OverflowStrategy};
///
/// let err = MailboxError::Overflow {
///     capacity: 100,
///     strategy: OverflowStrategy::ThrowOnOverflow,
/// };
/// assert!(err.to_string().contains("100"));
///
/// let err = MailboxError::Closed;
/// assert_eq!(err.to_string(), "mailbox is closed");
/// ```
#[derive(Debug, Error)]
pub enum MailboxError {
    /// The mailbox was closed before the operation.
    #[error("mailbox is closed")]
    Closed,

    /// A bounded mailbox was full under the `ThrowOnOverflow` strategy.
    #[error("mailbox overflow (capacity: {capacity}, strategy: {strategy})")]
    Overflow {
        capacity: usize,
        strategy: OverflowStrategy,
    },

    /// A blocking receive exceeded the caller's timeout.
    #[error("mailbox receive timed out after {timeout:?}")]
    Timeout { timeout: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_display() {
        assert_eq!(MailboxError::Closed.to_string(), "mailbox is closed");
    }

    #[test]
    fn test_overflow_display() {
        let err = MailboxError::Overflow {
            capacity: 2,
            strategy: OverflowStrategy::ThrowOnOverflow,
        };
        let msg = err.to_string();
        assert!(msg.contains("overflow"));
        assert!(msg.contains('2'));
        assert!(msg.contains("ThrowOnOverflow"));
    }

    #[test]
    fn test_timeout_display() {
        let err = MailboxError::Timeout {
            timeout: Duration::from_millis(10),
        };
        assert!(err.to_string().contains("timed out"));
    }
}
