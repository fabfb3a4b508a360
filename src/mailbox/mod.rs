//! Mailbox subsystem: envelope queuing with overflow control.
//!
//! A [`Mailbox`] is a FIFO queue of opaque envelopes bridging a
//! cooperatively-scheduled channel with a synchronous after-close drain.
//!
//! # Components
//!
//! - [`Mailbox`] - the queue itself, cloneable across tasks
//! - [`MailboxConfig`] - bounded/unbounded capacity plus overflow strategy
//! - [`OverflowStrategy`] - what a full bounded mailbox does with a newcomer
//! - [`EnqueueResult`] - outcome of a non-throwing enqueue
//! - [`MailboxError`] - closed, overflow, and timeout failures
//! - [`MailboxMetrics`] - sent/received/dropped counters
//!
//! # Overflow strategies
//!
//! ```text
//! DropNewest       discard the incoming envelope, keep the resident prefix
//! DropOldest       evict the queue head, accept the newcomer
//! Backpressure     report Backpressured, enqueue nothing
//! ThrowOnOverflow  fail with MailboxOverflow
//! ```

pub mod config;
pub mod errors;
pub mod metrics;
pub mod queue;
pub mod strategy;

pub use config::{MailboxConfig, UNBOUNDED_CAPACITY};
pub use errors::MailboxError;
pub use metrics::MailboxMetrics;
pub use queue::Mailbox;
pub use strategy::{EnqueueResult, OverflowStrategy};
