//! Scheduler timing floor shared by timers and blocking receives.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
// (none)

/// Minimum effective delay for timers and bounded waits.
///
/// The scheduler's timer wheel has millisecond granularity, so delays below
/// one millisecond are clamped up to it. Genuinely non-blocking operations
/// (`enqueue`, `dequeue`) never consult this constant; they use the channel's
/// `try_send`/`try_recv` primitives and return without suspending.
pub const MIN_TIMER_GRANULARITY: Duration = Duration::from_millis(1);

/// Clamp a requested delay to the scheduler's timing floor.
pub(crate) fn clamp_delay(delay: Duration) -> Duration {
    delay.max(MIN_TIMER_GRANULARITY)
}
