//! Prelude module for convenient imports.
//!
//! Re-exports the types needed for everyday use of the runtime:
//!
//! ```rust
//! use cadre_rt::prelude::*;
//! ```

pub use crate::future::{FutureError, FutureSlot};
pub use crate::mailbox::{
    EnqueueResult, Mailbox, MailboxConfig, MailboxError, OverflowStrategy,
};
pub use crate::runtime::{Cancellable, Runtime, RuntimeConfig, RuntimeError};
pub use crate::util::{TaskId, TimerId};
