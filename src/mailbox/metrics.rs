//! Lock-free mailbox metrics.
//!
//! Counters use atomic operations; the last-message timestamp sits behind a
//! `parking_lot` read-write lock since it is written far less often than it
//! is read.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicU64, Ordering};

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

// Layer 3: Internal module imports
// (none)

/// Message-flow counters carried by every mailbox.
///
/// # Example
///
/// ```rust
/// use cadre_rt::mailbox::{Mailbox, MailboxConfig};
///
/// let mailbox: Mailbox<u32> = Mailbox::new(MailboxConfig::unbounded());
/// mailbox.enqueue(1).unwrap();
/// assert_eq!(mailbox.metrics().sent_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MailboxMetrics {
    messages_sent: AtomicU64,
    messages_received: AtomicU64,
    messages_dropped: AtomicU64,
    last_message_at: RwLock<Option<DateTime<Utc>>>,
}

impl MailboxMetrics {
    /// Create a metrics recorder with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_sent(&self) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_received(&self) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
        *self.last_message_at.write() = Some(Utc::now());
    }

    pub(crate) fn record_dropped(&self) {
        self.messages_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Total envelopes accepted into the queue.
    pub fn sent_count(&self) -> u64 {
        self.messages_sent.load(Ordering::Relaxed)
    }

    /// Total envelopes handed to readers.
    pub fn received_count(&self) -> u64 {
        self.messages_received.load(Ordering::Relaxed)
    }

    /// Total envelopes discarded by an overflow policy.
    pub fn dropped_count(&self) -> u64 {
        self.messages_dropped.load(Ordering::Relaxed)
    }

    /// Timestamp of the most recent successful receive, if any.
    pub fn last_message_at(&self) -> Option<DateTime<Utc>> {
        *self.last_message_at.read()
    }
}
