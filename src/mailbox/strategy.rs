//! Overflow strategies for handling full mailboxes.
//!
//! When a bounded mailbox reaches capacity, the overflow strategy determines
//! how an additional incoming envelope is handled. Strategies that do not
//! raise an error report their decision through [`EnqueueResult`].

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// Overflow strategies for handling full mailboxes.
///
/// # Strategy Selection
///
/// - **DropNewest**: discard the incoming envelope, keep the resident prefix
/// - **DropOldest**: evict the head of the queue to make room for the newcomer
/// - **Backpressure**: report `Backpressured` and let the sender decide
/// - **ThrowOnOverflow**: fail the enqueue with a `MailboxOverflow` error
///
/// # Example
///
/// ```rust
/// use cadre_rt::mailbox::OverflowStrategy;
///
/// let strategy = OverflowStrategy::default();
/// assert_eq!(strategy, OverflowStrategy::ThrowOnOverflow);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OverflowStrategy {
    /// Discard the incoming envelope when the mailbox is full.
    ///
    /// The envelopes already resident are untouched, so the accepted prefix
    /// is preserved in FIFO order.
    DropNewest,

    /// Evict the oldest resident envelope and accept the newcomer.
    ///
    /// Survivors keep their relative FIFO order.
    DropOldest,

    /// Reject the envelope with an ordinary `Backpressured` result.
    ///
    /// Nothing is enqueued; the caller owns the retry or discard decision.
    Backpressure,

    /// Fail the enqueue with a `MailboxOverflow` error.
    ///
    /// Use for request/response patterns where the sender needs to know
    /// immediately that delivery failed.
    #[default]
    ThrowOnOverflow,
}

impl fmt::Display for OverflowStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DropNewest => write!(f, "DropNewest"),
            Self::DropOldest => write!(f, "DropOldest"),
            Self::Backpressure => write!(f, "Backpressure"),
            Self::ThrowOnOverflow => write!(f, "ThrowOnOverflow"),
        }
    }
}

/// Outcome of a non-throwing enqueue.
///
/// `Dropped` and `Backpressured` are ordinary results, not errors; only the
/// `ThrowOnOverflow` strategy and a closed mailbox surface as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueResult {
    /// The envelope was placed in the queue.
    Accepted,
    /// The envelope (or, under `DropOldest`, a resident one) was discarded.
    Dropped,
    /// The mailbox was full under the `Backpressure` strategy; nothing was
    /// enqueued.
    Backpressured,
}

impl EnqueueResult {
    /// True when the envelope ended up in the queue.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}
