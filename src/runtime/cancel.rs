//! Cancellation handles for scheduled timers.

// Layer 1: Standard library imports
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;

// Layer 3: Internal module imports
use crate::util::TimerId;

/// Handle for revoking a scheduled timer.
///
/// Two variants share one public surface:
///
/// - **timer-backed**: wraps a live timer id. The first `cancel` fires the
///   timer's cancellation token and deregisters the id; later calls are
///   no-ops. The flag turning true means clearance was requested before
///   firing, not that the callback never ran.
/// - **deferred**: covers a timer requested before the scheduler started. It
///   shares a flag with the queued install thunk; when the flag is set at
///   scheduler start the thunk skips installation entirely.
///
/// `is_cancelled` is monotonic: once true it stays true.
pub struct Cancellable {
    cancelled: Arc<AtomicBool>,
    kind: CancelKind,
}

enum CancelKind {
    Timer {
        id: TimerId,
        token: CancellationToken,
        registry: Arc<DashMap<TimerId, CancellationToken>>,
    },
    Deferred,
}

impl Cancellable {
    pub(crate) fn for_timer(
        id: TimerId,
        token: CancellationToken,
        registry: Arc<DashMap<TimerId, CancellationToken>>,
    ) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            kind: CancelKind::Timer {
                id,
                token,
                registry,
            },
        }
    }

    pub(crate) fn deferred(cancelled: Arc<AtomicBool>) -> Self {
        Self {
            cancelled,
            kind: CancelKind::Deferred,
        }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        if let CancelKind::Timer {
            id,
            token,
            registry,
        } = &self.kind
        {
            token.cancel();
            registry.remove(id);
            tracing::trace!(timer = %id, "timer cancelled");
        }
    }

    /// Whether `cancel` has been called on this handle.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for Cancellable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            CancelKind::Timer { id, .. } => format!("timer({id})"),
            CancelKind::Deferred => "deferred".to_string(),
        };
        f.debug_struct("Cancellable")
            .field("kind", &kind)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deferred_cancel_sets_shared_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let handle = Cancellable::deferred(Arc::clone(&flag));

        assert!(!handle.is_cancelled());
        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_timer_cancel_is_idempotent_and_deregisters() {
        let registry = Arc::new(DashMap::new());
        let token = CancellationToken::new();
        let id = TimerId::new(1);
        registry.insert(id, token.clone());

        let handle = Cancellable::for_timer(id, token.clone(), Arc::clone(&registry));
        handle.cancel();
        handle.cancel();

        assert!(handle.is_cancelled());
        assert!(token.is_cancelled());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_debug_names_variant() {
        let flag = Arc::new(AtomicBool::new(false));
        let handle = Cancellable::deferred(flag);
        let debug = format!("{handle:?}");
        assert!(debug.contains("deferred"));
    }
}
