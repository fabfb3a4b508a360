//! Single-assignment future cell with cancellation.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::watch;

// Layer 3: Internal module imports
// (none)

/// Errors surfaced when awaiting a resolved slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FutureError {
    /// The slot was cancelled before a value arrived.
    #[error("future was cancelled")]
    Cancelled,

    /// The producer failed the slot.
    #[error("future failed: {0}")]
    Failed(String),
}

enum Outcome<T> {
    Value(T),
    Failed(String),
    Cancelled,
}

struct SlotState<T> {
    outcome: Option<Outcome<T>>,
    cancel_callbacks: Vec<Box<dyn FnOnce() + Send>>,
}

/// Rendezvous between one producer and any number of awaiters for a single
/// outcome.
///
/// The first of `resolve`, `fail`, or `cancel` decides the outcome; later
/// calls are no-ops. Awaiters suspend on an internal signal until resolution.
/// Handles are cheap to clone and share the same cell.
///
/// Timeouts are not built in; callers arrange them externally, typically by
/// scheduling a runtime timer that fails the slot.
///
/// # Example
///
/// ```rust
/// use cadre_rt::future::FutureSlot;
///
/// # tokio_test::block_on(async {
/// let slot = FutureSlot::new();
/// slot.resolve(7u32);
/// assert_eq!(slot.wait().await.unwrap(), 7);
/// # });
/// ```
pub struct FutureSlot<T> {
    inner: Arc<SlotInner<T>>,
}

struct SlotInner<T> {
    state: Mutex<SlotState<T>>,
    signal_tx: watch::Sender<bool>,
    signal_rx: watch::Receiver<bool>,
}

impl<T> Clone for FutureSlot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for FutureSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FutureSlot<T> {
    /// Create an unresolved slot.
    pub fn new() -> Self {
        let (signal_tx, signal_rx) = watch::channel(false);
        Self {
            inner: Arc::new(SlotInner {
                state: Mutex::new(SlotState {
                    outcome: None,
                    cancel_callbacks: Vec::new(),
                }),
                signal_tx,
                signal_rx,
            }),
        }
    }

    /// Store the value and wake every awaiter. No-op once resolved.
    pub fn resolve(&self, value: T) {
        self.complete(Outcome::Value(value));
    }

    /// Store a failure and wake every awaiter. No-op once resolved.
    pub fn fail(&self, reason: impl Into<String>) {
        self.complete(Outcome::Failed(reason.into()));
    }

    fn complete(&self, outcome: Outcome<T>) {
        {
            let mut state = self.inner.state.lock();
            if state.outcome.is_some() {
                return;
            }
            state.outcome = Some(outcome);
        }
        self.inner.signal_tx.send_replace(true);
    }

    /// Cancel the slot. No-op once resolved.
    ///
    /// Registered cancel callbacks run synchronously on the caller's task in
    /// registration order, before awaiters are woken.
    pub fn cancel(&self) {
        let callbacks = {
            let mut state = self.inner.state.lock();
            if state.outcome.is_some() {
                return;
            }
            state.outcome = Some(Outcome::Cancelled);
            std::mem::take(&mut state.cancel_callbacks)
        };

        for callback in callbacks {
            callback();
        }
        self.inner.signal_tx.send_replace(true);
    }

    /// Register a callback to run when the slot is cancelled.
    ///
    /// On an already-cancelled slot the callback runs immediately on the
    /// caller's task. On a slot resolved with a value or failure it is
    /// dropped.
    pub fn on_cancel(&self, callback: impl FnOnce() + Send + 'static) {
        let run_now = {
            let mut state = self.inner.state.lock();
            match state.outcome {
                Some(Outcome::Cancelled) => true,
                Some(_) => false,
                None => {
                    state.cancel_callbacks.push(Box::new(callback));
                    return;
                }
            }
        };

        if run_now {
            callback();
        }
    }

    /// Whether an outcome has been decided.
    pub fn is_resolved(&self) -> bool {
        self.inner.state.lock().outcome.is_some()
    }
}

impl<T: Clone> FutureSlot<T> {
    /// Suspend until the slot resolves, then yield its outcome.
    ///
    /// The value clones out to every awaiter.
    ///
    /// # Errors
    ///
    /// Returns [`FutureError::Failed`] when the producer failed the slot and
    /// [`FutureError::Cancelled`] when it was cancelled.
    pub async fn wait(&self) -> Result<T, FutureError> {
        let mut signal = self.inner.signal_rx.clone();
        loop {
            if let Some(result) = self.try_outcome() {
                return result;
            }
            // The cell owns the sender, so the signal cannot disappear while
            // this handle is alive.
            let _ = signal.changed().await;
        }
    }

    fn try_outcome(&self) -> Option<Result<T, FutureError>> {
        let state = self.inner.state.lock();
        state.outcome.as_ref().map(|outcome| match outcome {
            Outcome::Value(value) => Ok(value.clone()),
            Outcome::Failed(reason) => Err(FutureError::Failed(reason.clone())),
            Outcome::Cancelled => Err(FutureError::Cancelled),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_new_slot_is_unresolved() {
        let slot: FutureSlot<u32> = FutureSlot::new();
        assert!(!slot.is_resolved());
    }

    #[test]
    fn test_resolve_wins_over_later_calls() {
        let slot = FutureSlot::new();
        slot.resolve(1u32);
        assert!(slot.is_resolved());

        slot.resolve(2);
        slot.fail("too late");
        slot.cancel();

        let result = tokio_test::block_on(slot.wait());
        assert_eq!(result.unwrap(), 1);
    }

    #[test]
    fn test_fail_surfaces_as_error() {
        let slot: FutureSlot<u32> = FutureSlot::new();
        slot.fail("boom");

        let result = tokio_test::block_on(slot.wait());
        assert_eq!(result, Err(FutureError::Failed("boom".to_string())));
    }

    #[test]
    fn test_cancel_surfaces_as_error() {
        let slot: FutureSlot<u32> = FutureSlot::new();
        slot.cancel();

        let result = tokio_test::block_on(slot.wait());
        assert_eq!(result, Err(FutureError::Cancelled));
    }

    #[test]
    fn test_cancel_runs_callbacks_in_registration_order() {
        let slot: FutureSlot<u32> = FutureSlot::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            slot.on_cancel(move || order.lock().push(tag));
        }
        slot.cancel();

        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_on_cancel_after_cancel_runs_immediately() {
        let slot: FutureSlot<u32> = FutureSlot::new();
        slot.cancel();

        let fired = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&fired);
        slot.on_cancel(move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callbacks_not_run_on_resolve() {
        let slot = FutureSlot::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&fired);
        slot.on_cancel(move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        slot.resolve(5u32);
        slot.cancel();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_wait_unblocks_on_late_resolve() {
        let slot = FutureSlot::new();

        let producer = slot.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            producer.resolve("done");
        });

        assert_eq!(slot.wait().await.unwrap(), "done");
    }

    #[tokio::test]
    async fn test_cancel_unblocks_every_awaiter() {
        let slot: FutureSlot<u32> = FutureSlot::new();

        let first = slot.clone();
        let second = slot.clone();
        let a = tokio::spawn(async move { first.wait().await });
        let b = tokio::spawn(async move { second.wait().await });

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        slot.cancel();

        assert_eq!(a.await.unwrap(), Err(FutureError::Cancelled));
        assert_eq!(b.await.unwrap(), Err(FutureError::Cancelled));
    }

    #[tokio::test]
    async fn test_value_clones_to_every_awaiter() {
        let slot = FutureSlot::new();

        let first = slot.clone();
        let a = tokio::spawn(async move { first.wait().await });
        slot.resolve("shared".to_string());

        assert_eq!(a.await.unwrap().unwrap(), "shared");
        assert_eq!(slot.wait().await.unwrap(), "shared");
    }
}
