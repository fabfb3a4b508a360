//! FIFO mailbox with overflow policies and a close-then-drain lifecycle.

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;

// Layer 3: Internal module imports
use super::config::MailboxConfig;
use super::errors::MailboxError;
use super::metrics::MailboxMetrics;
use super::strategy::{EnqueueResult, OverflowStrategy};
use crate::util::timing::clamp_delay;

/// FIFO queue of envelopes with an overflow policy and post-close drain.
///
/// The mailbox never inspects its elements; any `Send` type works as the
/// envelope. Handles are cheap to clone and all operations take `&self`, so
/// producers and consumers share one mailbox across tasks.
///
/// Ordering is FIFO for any enqueue/dequeue sequence the overflow policy did
/// not drop, under cooperative interleaving of a single producer and a single
/// consumer. Multi-producer use requires external ordering.
///
/// # Lifecycle
///
/// `close` is terminal: it moves every envelope still resident in the channel
/// into a synchronous drain queue and closes the channel. Readers keep
/// observing the drained envelopes through `dequeue`/`dequeue_blocking`;
/// writers fail with [`MailboxError::Closed`].
///
/// # Example
///
/// ```rust
/// use cadre_rt::mailbox::{EnqueueResult, Mailbox, MailboxConfig};
///
/// let mailbox: Mailbox<&str> = Mailbox::new(MailboxConfig::unbounded());
/// assert_eq!(mailbox.enqueue("hello").unwrap(), EnqueueResult::Accepted);
/// assert_eq!(mailbox.dequeue(), Some("hello"));
/// assert_eq!(mailbox.dequeue(), None);
/// ```
pub struct Mailbox<M> {
    inner: Arc<MailboxInner<M>>,
}

struct MailboxInner<M> {
    config: MailboxConfig,
    sender: Mutex<Option<flume::Sender<M>>>,
    receiver: flume::Receiver<M>,
    closed: AtomicBool,
    drain: Mutex<VecDeque<M>>,
    metrics: MailboxMetrics,
}

impl<M> Clone for Mailbox<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M: Send + 'static> Mailbox<M> {
    /// Create a mailbox from a configuration.
    ///
    /// Bounded configurations get a channel of exactly `capacity`; unbounded
    /// ones get a channel with no limit.
    pub fn new(config: MailboxConfig) -> Self {
        let (sender, receiver) = if config.bounded {
            flume::bounded(config.capacity)
        } else {
            flume::unbounded()
        };

        Self {
            inner: Arc::new(MailboxInner {
                config,
                sender: Mutex::new(Some(sender)),
                receiver,
                closed: AtomicBool::new(false),
                drain: Mutex::new(VecDeque::new()),
                metrics: MailboxMetrics::new(),
            }),
        }
    }

    /// The configuration this mailbox was created with.
    pub fn config(&self) -> &MailboxConfig {
        &self.inner.config
    }

    /// Flow counters for this mailbox.
    pub fn metrics(&self) -> &MailboxMetrics {
        &self.inner.metrics
    }

    /// Offer an envelope to the mailbox without suspending.
    ///
    /// A full bounded mailbox dispatches on the configured
    /// [`OverflowStrategy`]; the non-throwing strategies report their decision
    /// through [`EnqueueResult`].
    ///
    /// # Errors
    ///
    /// Returns [`MailboxError::Closed`] once the mailbox has been closed, and
    /// [`MailboxError::Overflow`] when full under `ThrowOnOverflow`.
    pub fn enqueue(&self, envelope: M) -> Result<EnqueueResult, MailboxError> {
        if self.inner.closed.load(Ordering::Acquire) {
            return Err(MailboxError::Closed);
        }

        let guard = self.inner.sender.lock();
        let Some(sender) = guard.as_ref() else {
            return Err(MailboxError::Closed);
        };

        match sender.try_send(envelope) {
            Ok(()) => {
                self.inner.metrics.record_sent();
                Ok(EnqueueResult::Accepted)
            }
            Err(flume::TrySendError::Disconnected(_)) => Err(MailboxError::Closed),
            Err(flume::TrySendError::Full(envelope)) => self.enqueue_full(sender, envelope),
        }
    }

    fn enqueue_full(
        &self,
        sender: &flume::Sender<M>,
        envelope: M,
    ) -> Result<EnqueueResult, MailboxError> {
        match self.inner.config.strategy {
            OverflowStrategy::DropNewest => {
                self.inner.metrics.record_dropped();
                Ok(EnqueueResult::Dropped)
            }
            OverflowStrategy::Backpressure => Ok(EnqueueResult::Backpressured),
            OverflowStrategy::ThrowOnOverflow => Err(MailboxError::Overflow {
                capacity: self.inner.config.capacity,
                strategy: self.inner.config.strategy,
            }),
            OverflowStrategy::DropOldest => {
                if self.inner.receiver.try_recv().is_ok() {
                    self.inner.metrics.record_dropped();
                }
                match sender.try_send(envelope) {
                    Ok(()) => {
                        self.inner.metrics.record_sent();
                        Ok(EnqueueResult::Accepted)
                    }
                    Err(flume::TrySendError::Disconnected(_)) => Err(MailboxError::Closed),
                    // A competing producer refilled the slot; the newcomer
                    // loses, matching DropNewest for this envelope.
                    Err(flume::TrySendError::Full(_)) => {
                        self.inner.metrics.record_dropped();
                        Ok(EnqueueResult::Dropped)
                    }
                }
            }
        }
    }

    /// Take the next envelope without suspending.
    ///
    /// Returns `None` when the open channel is empty, or when the mailbox is
    /// closed and the drain queue is exhausted.
    pub fn dequeue(&self) -> Option<M> {
        if self.inner.closed.load(Ordering::Acquire) {
            return self.pop_drain();
        }

        match self.inner.receiver.try_recv() {
            Ok(envelope) => {
                self.inner.metrics.record_received();
                Some(envelope)
            }
            Err(flume::TryRecvError::Empty) => None,
            // Close raced us; whatever was resident now sits in the drain.
            Err(flume::TryRecvError::Disconnected) => self.pop_drain(),
        }
    }

    /// Wait cooperatively for the next envelope, bounded by `timeout`.
    ///
    /// Timeouts below the scheduler granularity are clamped up to one
    /// millisecond. On a closed mailbox the drain queue is served without
    /// waiting.
    ///
    /// # Errors
    ///
    /// Returns [`MailboxError::Closed`] when the mailbox is closed and
    /// drained, and [`MailboxError::Timeout`] carrying the requested timeout
    /// when the wait elapses.
    pub async fn dequeue_blocking(&self, timeout: Duration) -> Result<M, MailboxError> {
        if self.inner.closed.load(Ordering::Acquire) {
            return self.pop_drain().ok_or(MailboxError::Closed);
        }

        match tokio::time::timeout(clamp_delay(timeout), self.inner.receiver.recv_async()).await {
            Ok(Ok(envelope)) => {
                self.inner.metrics.record_received();
                Ok(envelope)
            }
            Ok(Err(_disconnected)) => self.pop_drain().ok_or(MailboxError::Closed),
            Err(_elapsed) => Err(MailboxError::Timeout { timeout }),
        }
    }

    fn pop_drain(&self) -> Option<M> {
        let envelope = self.inner.drain.lock().pop_front();
        if envelope.is_some() {
            self.inner.metrics.record_received();
        }
        envelope
    }

    /// Number of envelopes currently resident.
    ///
    /// While open this is the channel length; after close it is the drain
    /// queue length.
    pub fn len(&self) -> usize {
        if self.inner.closed.load(Ordering::Acquire) {
            self.inner.drain.lock().len()
        } else {
            self.inner.receiver.len()
        }
    }

    /// True when no envelope is resident.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when a bounded mailbox is at capacity. Never true for unbounded.
    pub fn is_full(&self) -> bool {
        if !self.inner.config.bounded {
            return false;
        }
        self.len() >= self.inner.config.capacity
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Close the mailbox. Idempotent.
    ///
    /// Every envelope still resident in the channel is moved into the drain
    /// queue before the channel itself is closed, so readers keep observing
    /// already-accepted envelopes in FIFO order.
    pub fn close(&self) {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        let sender = self.inner.sender.lock().take();
        {
            let mut drain = self.inner.drain.lock();
            while let Ok(envelope) = self.inner.receiver.try_recv() {
                drain.push_back(envelope);
            }
            tracing::debug!(remaining = drain.len(), "mailbox closed");
        }
        drop(sender);
    }
}
