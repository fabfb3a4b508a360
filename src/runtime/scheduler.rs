//! Runtime lifecycle: pre-start queuing, scheduler entry, and quiescence.

// Layer 1: Standard library imports
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

// Layer 3: Internal module imports
use super::cancel::Cancellable;
use super::config::RuntimeConfig;
use super::errors::RuntimeError;
use super::timer::{self, DeferredTimer};
use super::RUNTIME_TAG;
use crate::mailbox::{Mailbox, MailboxConfig};
use crate::util::{TaskId, TimerId};

pub(crate) type TaskFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Cooperative runtime: accepts spawns and timer requests before or during
/// execution, runs them on a single-threaded scheduler, and quiesces once
/// every task and timer has completed.
///
/// Handles are cheap to clone and share one runtime.
///
/// # Lifecycle
///
/// ```text
/// Idle --spawn/schedule--> Idle (queued)
/// Idle --run--> Running (queued timers installed, then queued tasks started)
/// Running --shutdown--> timers cleared, tasks exit --> Idle
/// ```
///
/// `run` blocks the calling thread until the scheduler has no remaining work,
/// so it must not be invoked from inside an async context. After quiescence
/// the runtime may be run again.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// use cadre_rt::{Runtime, RuntimeConfig};
///
/// let runtime = Runtime::new(RuntimeConfig::default());
/// let done = Arc::new(AtomicBool::new(false));
///
/// let flag = Arc::clone(&done);
/// runtime.spawn(async move {
///     flag.store(true, Ordering::SeqCst);
/// }).unwrap();
///
/// runtime.run().unwrap();
/// assert!(done.load(Ordering::SeqCst));
/// ```
pub struct Runtime {
    inner: Arc<RuntimeInner>,
}

pub(crate) struct RuntimeInner {
    config: RuntimeConfig,
    running: AtomicBool,
    next_task_id: AtomicU64,
    next_timer_id: AtomicU64,
    pending_spawns: Mutex<Vec<(TaskId, TaskFuture)>>,
    pending_timers: Mutex<Vec<DeferredTimer>>,
    pub(crate) timers: Arc<DashMap<TimerId, CancellationToken>>,
    pub(crate) tracker: TaskTracker,
    handle: RwLock<Option<Handle>>,
}

impl RuntimeInner {
    pub(crate) fn allocate_timer_id(&self) -> TimerId {
        TimerId::new(self.next_timer_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Spawn a future onto the live scheduler's task tracker.
    ///
    /// Callers gate on scheduler liveness; a miss here can only come from an
    /// unsupported cross-thread race and the task is dropped.
    pub(crate) fn spawn_tracked<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let guard = self.handle.read();
        if let Some(handle) = guard.as_ref() {
            let _ = self.tracker.spawn_on(task, handle);
        } else {
            tracing::warn!("task dropped: scheduler is not live");
        }
    }

    fn scheduler_live(&self) -> bool {
        self.handle.read().is_some()
    }
}

impl Clone for Runtime {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}

impl Runtime {
    /// Create an idle runtime with the given configuration.
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            inner: Arc::new(RuntimeInner {
                config,
                running: AtomicBool::new(false),
                next_task_id: AtomicU64::new(1),
                next_timer_id: AtomicU64::new(1),
                pending_spawns: Mutex::new(Vec::new()),
                pending_timers: Mutex::new(Vec::new()),
                timers: Arc::new(DashMap::new()),
                tracker: TaskTracker::new(),
                handle: RwLock::new(None),
            }),
        }
    }

    /// Stable identifier of the scheduler binding.
    pub fn name(&self) -> &'static str {
        RUNTIME_TAG
    }

    /// The configuration this runtime was created with.
    pub fn config(&self) -> &RuntimeConfig {
        &self.inner.config
    }

    /// Whether a `run` pass is currently active.
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    /// Create a mailbox from an explicit configuration.
    ///
    /// Works inside or outside the scheduler; the mailbox's cooperative
    /// operations need the scheduler to be live.
    pub fn create_mailbox<M: Send + 'static>(&self, config: MailboxConfig) -> Mailbox<M> {
        Mailbox::new(config)
    }

    /// Create a bounded mailbox at the configured default capacity.
    pub fn create_default_mailbox<M: Send + 'static>(&self) -> Mailbox<M> {
        Mailbox::new(MailboxConfig::bounded(
            self.inner.config.default_mailbox_capacity,
        ))
    }

    /// Submit a task for cooperative execution.
    ///
    /// While the scheduler is live the task starts immediately; otherwise it
    /// is queued and started by the next `run` in submission order. Ids are
    /// unique within this runtime and render as `<tag>-<n>`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::TaskLimitExceeded`] when the configured task
    /// ceiling is reached.
    pub fn spawn<F>(&self, task: F) -> Result<TaskId, RuntimeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.inner.config.max_tasks > 0 {
            let current = self.inner.tracker.len() + self.inner.pending_spawns.lock().len();
            if current >= self.inner.config.max_tasks {
                return Err(RuntimeError::TaskLimitExceeded {
                    current,
                    max: self.inner.config.max_tasks,
                });
            }
        }

        let id = TaskId::new(self.inner.next_task_id.fetch_add(1, Ordering::SeqCst));
        if self.inner.scheduler_live() {
            self.inner.spawn_tracked(task);
            tracing::trace!(task = %id, "task started");
        } else {
            self.inner.pending_spawns.lock().push((id, Box::pin(task)));
            tracing::trace!(task = %id, "task queued until scheduler start");
        }
        Ok(id)
    }

    /// Schedule a one-shot timer.
    ///
    /// Inside the scheduler a live timer is installed for `max(1ms, delay)`
    /// and the handle wraps its id. Outside, the request is queued and the
    /// handle is deferred: cancelling it before `run` suppresses installation
    /// entirely.
    pub fn schedule_once<F>(&self, delay: Duration, callback: F) -> Cancellable
    where
        F: FnOnce() + Send + 'static,
    {
        if self.inner.scheduler_live() {
            let (id, token) = timer::install_once(&self.inner, delay, Box::new(callback));
            Cancellable::for_timer(id, token, Arc::clone(&self.inner.timers))
        } else {
            let cancelled = Arc::new(AtomicBool::new(false));
            self.inner.pending_timers.lock().push(DeferredTimer::Once {
                delay,
                callback: Box::new(callback),
                cancelled: Arc::clone(&cancelled),
            });
            Cancellable::deferred(cancelled)
        }
    }

    /// Schedule a repeating timer.
    ///
    /// The callback fires once after `max(1ms, initial_delay)` and then for
    /// every `max(1ms, interval)` tick. The returned handle covers the
    /// initial-delay timer only: cancelling before the initial fire prevents
    /// any invocation, while cancelling afterwards leaves the recurring timer
    /// running until `shutdown` clears it.
    pub fn schedule_repeatedly<F>(
        &self,
        initial_delay: Duration,
        interval: Duration,
        callback: F,
    ) -> Cancellable
    where
        F: FnMut() + Send + 'static,
    {
        if self.inner.scheduler_live() {
            let (id, token) =
                timer::install_repeating(&self.inner, initial_delay, interval, Box::new(callback));
            Cancellable::for_timer(id, token, Arc::clone(&self.inner.timers))
        } else {
            let cancelled = Arc::new(AtomicBool::new(false));
            self.inner
                .pending_timers
                .lock()
                .push(DeferredTimer::Repeating {
                    initial_delay,
                    interval,
                    callback: Box::new(callback),
                    cancelled: Arc::clone(&cancelled),
                });
            Cancellable::deferred(cancelled)
        }
    }

    /// Surrender control to the scheduler until other ready tasks have run.
    pub async fn yield_now(&self) {
        tokio::task::yield_now().await;
    }

    /// Suspend the current task for `duration`. No-op when zero.
    pub async fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        tokio::time::sleep(duration).await;
    }

    /// Enter the scheduler and block until it quiesces.
    ///
    /// Queued timer requests are materialized first, in insertion order, then
    /// queued tasks are started in submission order. The call returns once
    /// every tracked task and timer has completed; the runtime may then be
    /// run again.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::AlreadyRunning`] when a pass is already active
    /// and [`RuntimeError::SchedulerStart`] when the host scheduler cannot be
    /// built.
    pub fn run(&self) -> Result<(), RuntimeError> {
        if self.inner.running.swap(true, Ordering::SeqCst) {
            return Err(RuntimeError::AlreadyRunning);
        }

        let mut builder = tokio::runtime::Builder::new_current_thread();
        builder.enable_time();
        if self.inner.config.enable_io_driver {
            builder.enable_io();
        }
        let scheduler = match builder.build() {
            Ok(scheduler) => scheduler,
            Err(err) => {
                self.inner.running.store(false, Ordering::SeqCst);
                return Err(RuntimeError::SchedulerStart(err));
            }
        };

        tracing::debug!(runtime = RUNTIME_TAG, "scheduler starting");
        scheduler.block_on(async {
            *self.inner.handle.write() = Some(Handle::current());

            let deferred: Vec<DeferredTimer> =
                std::mem::take(&mut *self.inner.pending_timers.lock());
            for entry in deferred {
                timer::run_deferred(&self.inner, entry);
            }

            let queued: Vec<(TaskId, TaskFuture)> =
                std::mem::take(&mut *self.inner.pending_spawns.lock());
            for (id, task) in queued {
                tracing::trace!(task = %id, "starting queued task");
                let _ = self.inner.tracker.spawn(task);
            }

            self.inner.tracker.close();
            self.inner.tracker.wait().await;
            self.inner.tracker.reopen();

            *self.inner.handle.write() = None;
        });
        self.inner.running.store(false, Ordering::SeqCst);
        tracing::debug!(runtime = RUNTIME_TAG, "scheduler quiesced");
        Ok(())
    }

    /// Clear every tracked timer so the scheduler can quiesce.
    ///
    /// In-flight tasks are not interrupted; they observe cooperation points
    /// (mailbox reads, sleeps) and exit on their own. The timeout parameter
    /// is accepted for signature stability and is not consulted.
    pub fn shutdown(&self, _timeout: Duration) {
        let cleared = self.inner.timers.len();
        for entry in self.inner.timers.iter() {
            entry.value().cancel();
        }
        self.inner.timers.clear();
        tracing::debug!(timers_cleared = cleared, "shutdown requested");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_runtime_creation() {
        let runtime = Runtime::new(RuntimeConfig::default());
        assert_eq!(runtime.name(), "tokio");
        assert!(!runtime.is_running());
    }

    #[test]
    fn test_spawn_ids_are_sequential_and_tagged() {
        let runtime = Runtime::new(RuntimeConfig::default());
        let first = runtime.spawn(async {}).unwrap();
        let second = runtime.spawn(async {}).unwrap();

        assert_eq!(first.to_string(), "tokio-1");
        assert_eq!(second.to_string(), "tokio-2");
        assert_ne!(first, second);
    }

    #[test]
    fn test_spawn_limit_enforced() {
        let runtime = Runtime::new(RuntimeConfig::default().with_max_tasks(1));
        runtime.spawn(async {}).unwrap();

        let result = runtime.spawn(async {});
        assert!(matches!(
            result,
            Err(RuntimeError::TaskLimitExceeded { current: 1, max: 1 })
        ));
    }

    #[test]
    fn test_run_executes_queued_task() {
        let runtime = Runtime::new(RuntimeConfig::default());
        let counter = Arc::new(AtomicUsize::new(0));

        let count = Arc::clone(&counter);
        runtime
            .spawn(async move {
                count.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        runtime.run().unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!runtime.is_running());
    }

    #[test]
    fn test_run_is_reentrant_after_quiescence() {
        let runtime = Runtime::new(RuntimeConfig::default());
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let count = Arc::clone(&counter);
            runtime
                .spawn(async move {
                    count.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
            runtime.run().unwrap();
        }

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_run_with_no_work_returns() {
        let runtime = Runtime::new(RuntimeConfig::default());
        runtime.run().unwrap();
        assert!(!runtime.is_running());
    }

    #[test]
    fn test_schedule_before_run_is_deferred() {
        let runtime = Runtime::new(RuntimeConfig::default());
        let handle = runtime.schedule_once(Duration::from_millis(1), || {});
        assert!(!handle.is_cancelled());
        handle.cancel();
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_create_default_mailbox_uses_configured_capacity() {
        let runtime = Runtime::new(RuntimeConfig::default().with_default_mailbox_capacity(7));
        let mailbox: Mailbox<u8> = runtime.create_default_mailbox();
        assert!(mailbox.config().bounded);
        assert_eq!(mailbox.config().capacity, 7);
    }

    #[tokio::test]
    async fn test_sleep_zero_is_noop_and_yield_returns() {
        let runtime = Runtime::new(RuntimeConfig::default());
        runtime.sleep(Duration::ZERO).await;
        runtime.yield_now().await;
    }
}
