//! Single-assignment future cell with blocking await and cancellation.
//!
//! - [`FutureSlot`] - one-shot value cell shared between a producer and
//!   awaiters
//! - [`FutureError`] - cancellation and producer-failure outcomes

pub mod slot;

pub use slot::{FutureError, FutureSlot};
