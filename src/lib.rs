//! # cadre-rt - Cooperative Actor-Runtime Primitives
//!
//! Concurrency substrate for building actor systems: a cooperative task
//! scheduler with pre-start queuing, a bounded/unbounded mailbox with four
//! overflow strategies and a close-then-drain lifecycle, a one-shot future
//! cell with cancellation, and cancellable one-shot and repeating timers.
//!
//! The actor model itself (identity, addressing, envelopes with routing
//! metadata, supervision) lives in layers built on top of this crate; the
//! mailbox treats its elements as opaque and the runtime schedules plain
//! futures.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use cadre_rt::prelude::*;
//!
//! let runtime = Runtime::new(RuntimeConfig::default());
//! let mailbox: Mailbox<&str> = runtime.create_mailbox(MailboxConfig::unbounded());
//! let delivered = Arc::new(AtomicUsize::new(0));
//!
//! // Producer sleeps, then posts a message.
//! let producer = mailbox.clone();
//! let rt = runtime.clone();
//! runtime.spawn(async move {
//!     rt.sleep(Duration::from_millis(5)).await;
//!     producer.enqueue("ping").unwrap();
//! }).unwrap();
//!
//! // Consumer blocks cooperatively until the message arrives.
//! let consumer = mailbox.clone();
//! let count = Arc::clone(&delivered);
//! runtime.spawn(async move {
//!     let msg = consumer.dequeue_blocking(Duration::from_millis(500)).await.unwrap();
//!     assert_eq!(msg, "ping");
//!     count.fetch_add(1, Ordering::SeqCst);
//! }).unwrap();
//!
//! runtime.run().unwrap();
//! assert_eq!(delivered.load(Ordering::SeqCst), 1);
//! ```
//!
//! # Module Organization
//!
//! - [`runtime`] - scheduler lifecycle, timers, cancellation handles
//! - [`mailbox`] - envelope queuing with overflow control and post-close drain
//! - [`future`] - single-assignment future cell with blocking await
//! - [`util`] - task/timer ids and the scheduler timing floor
//!
//! # Scheduling Model
//!
//! Execution is single-threaded and cooperative: every task, timer callback,
//! and channel operation shares one OS thread inside [`Runtime::run`].
//! Suspension points are explicit (`yield_now`, `sleep`, channel operations,
//! timer waits); between them a task's effects are atomic with respect to
//! other tasks. Cancellation is cooperative as well: a timer already mid-fire
//! cannot be revoked, and shutdown lets in-flight tasks exit at their next
//! cooperation point.

pub mod future;
pub mod mailbox;
pub mod prelude;
pub mod runtime;
pub mod util;

// Re-export commonly used types
pub use future::{FutureError, FutureSlot};
pub use mailbox::{
    EnqueueResult, Mailbox, MailboxConfig, MailboxError, MailboxMetrics, OverflowStrategy,
    UNBOUNDED_CAPACITY,
};
pub use runtime::{Cancellable, Runtime, RuntimeConfig, RuntimeError, RUNTIME_TAG};
pub use util::{TaskId, TimerId, MIN_TIMER_GRANULARITY};
