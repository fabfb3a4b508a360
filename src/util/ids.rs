// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::runtime::RUNTIME_TAG;

/// Identifier assigned to a spawned task.
///
/// Ids are monotonically increasing within a single `Runtime` instance and
/// render as `<tag>-<n>`, where the tag is the runtime's published name.
///
/// # Example
/// ```rust
/// use cadre_rt::{Runtime, RuntimeConfig};
///
/// let runtime = Runtime::new(RuntimeConfig::default());
/// let id = runtime.spawn(async {}).unwrap();
/// assert!(id.to_string().starts_with("tokio-"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    /// Get the numeric sequence component of the id.
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{RUNTIME_TAG}-{}", self.0)
    }
}

/// Identifier assigned by the timer subsystem to a registered timer.
///
/// Timer ids are tracked by the runtime so `shutdown` can revoke every
/// outstanding timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(u64);

impl TimerId {
    pub(crate) fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    /// Get the numeric value of the id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
