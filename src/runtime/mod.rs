//! Runtime lifecycle: pre-start queuing, scheduler entry, timers, shutdown.
//!
//! # Components
//!
//! - [`Runtime`] - accepts spawns and timer requests, runs the cooperative
//!   scheduler, quiesces on shutdown
//! - [`RuntimeConfig`] - immutable configuration with setter-style copies
//! - [`Cancellable`] - handle revoking a scheduled timer (live or deferred)
//! - [`RuntimeError`] - lifecycle failures

pub mod cancel;
pub mod config;
pub mod errors;
pub mod scheduler;
pub(crate) mod timer;

/// Stable tag identifying the scheduler binding. Spawn ids render as
/// `<tag>-<n>`.
pub const RUNTIME_TAG: &str = "tokio";

pub use cancel::Cancellable;
pub use config::{
    RuntimeConfig, DEFAULT_ENABLE_IO_DRIVER, DEFAULT_MAILBOX_CAPACITY, DEFAULT_MAX_TASKS,
};
pub use errors::RuntimeError;
pub use scheduler::Runtime;
