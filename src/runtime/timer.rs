//! Timer installation on the live scheduler.
//!
//! Timers requested before the scheduler starts are queued as
//! [`DeferredTimer`] thunks and materialized, in insertion order, when `run`
//! enters the scheduler.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use tokio_util::sync::CancellationToken;

// Layer 3: Internal module imports
use super::scheduler::RuntimeInner;
use crate::util::timing::clamp_delay;
use crate::util::TimerId;

/// A timer requested while the scheduler was not live.
///
/// The shared `cancelled` flag is the deferred handle's half of the contract:
/// when it is set before scheduler start, the thunk installs nothing.
pub(crate) enum DeferredTimer {
    Once {
        delay: Duration,
        callback: Box<dyn FnOnce() + Send>,
        cancelled: Arc<AtomicBool>,
    },
    Repeating {
        initial_delay: Duration,
        interval: Duration,
        callback: Box<dyn FnMut() + Send>,
        cancelled: Arc<AtomicBool>,
    },
}

/// Install a one-shot timer on the live scheduler.
pub(crate) fn install_once(
    inner: &Arc<RuntimeInner>,
    delay: Duration,
    callback: Box<dyn FnOnce() + Send>,
) -> (TimerId, CancellationToken) {
    let id = inner.allocate_timer_id();
    let token = CancellationToken::new();
    inner.timers.insert(id, token.clone());
    tracing::trace!(timer = %id, ?delay, "one-shot timer installed");

    let runtime = Arc::clone(inner);
    let timer_token = token.clone();
    inner.spawn_tracked(async move {
        tokio::select! {
            _ = timer_token.cancelled() => {}
            _ = tokio::time::sleep(clamp_delay(delay)) => callback(),
        }
        runtime.timers.remove(&id);
    });

    (id, token)
}

/// Install a repeating timer on the live scheduler.
///
/// The returned id and token belong to the initial-delay timer. Once the
/// initial delay fires, the recurring timer runs under its own tracked id, so
/// cancelling the returned handle afterwards does not stop it; `shutdown`
/// does.
pub(crate) fn install_repeating(
    inner: &Arc<RuntimeInner>,
    initial_delay: Duration,
    interval: Duration,
    mut callback: Box<dyn FnMut() + Send>,
) -> (TimerId, CancellationToken) {
    let initial_id = inner.allocate_timer_id();
    let initial_token = CancellationToken::new();
    inner.timers.insert(initial_id, initial_token.clone());
    tracing::trace!(timer = %initial_id, ?initial_delay, ?interval, "repeating timer installed");

    let runtime = Arc::clone(inner);
    let timer_token = initial_token.clone();
    inner.spawn_tracked(async move {
        tokio::select! {
            _ = timer_token.cancelled() => {
                runtime.timers.remove(&initial_id);
                return;
            }
            _ = tokio::time::sleep(clamp_delay(initial_delay)) => {}
        }
        runtime.timers.remove(&initial_id);

        // The recurring timer is registered before the first invocation so a
        // callback that calls shutdown still revokes it.
        let recurring_id = runtime.allocate_timer_id();
        let recurring_token = CancellationToken::new();
        runtime.timers.insert(recurring_id, recurring_token.clone());

        callback();
        loop {
            tokio::select! {
                _ = recurring_token.cancelled() => break,
                _ = tokio::time::sleep(clamp_delay(interval)) => callback(),
            }
        }
        runtime.timers.remove(&recurring_id);
    });

    (initial_id, initial_token)
}

/// Materialize a queued pre-start timer unless its handle was cancelled.
pub(crate) fn run_deferred(inner: &Arc<RuntimeInner>, timer: DeferredTimer) {
    match timer {
        DeferredTimer::Once {
            delay,
            callback,
            cancelled,
        } => {
            if cancelled.load(Ordering::SeqCst) {
                return;
            }
            let _ = install_once(inner, delay, callback);
        }
        DeferredTimer::Repeating {
            initial_delay,
            interval,
            callback,
            cancelled,
        } => {
            if cancelled.load(Ordering::SeqCst) {
                return;
            }
            let _ = install_repeating(inner, initial_delay, interval, callback);
        }
    }
}
