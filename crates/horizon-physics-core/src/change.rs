//! Edge-triggered change flags with batch coalescing.
//!
//! A [`ChangeFlag`] answers a single question for an observer: "did anything
//! change since I last looked?". It combines two halves:
//!
//! - **Push**: the [`invalidated`](ChangeFlag::invalidated) signal fires when
//!   the flag goes from clear to set. Further changes before the next read
//!   are absorbed, so a subscriber is told once per read cycle.
//! - **Pull**: [`take`](ChangeFlag::take) returns `true` once and clears the
//!   flag, re-arming the signal. The flag carries no history.
//!
//! # Batching
//!
//! [`ChangeFlag::batch`] returns a [`BatchGuard`]. While any guard is alive,
//! [`mark`](ChangeFlag::mark) only records that something is pending. When the
//! outermost guard is dropped the pending change is published once, no
//! matter how many fields were touched in between.
//!
//! ```
//! use horizon_physics_core::ChangeFlag;
//!
//! let flag = ChangeFlag::new();
//! {
//!     let _batch = flag.batch();
//!     flag.mark();
//!     flag.mark();
//!     flag.mark();
//!     assert_eq!(flag.notify_count(), 0);
//! }
//! assert_eq!(flag.notify_count(), 1);
//! assert!(flag.take());
//! assert!(!flag.take());
//! ```
//!
//! Batches and marks share a re-entrant lock. A mark from another thread
//! waits for an open batch to commit instead of joining it; nested batches
//! and marks on the batching thread go through.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

use crate::logging::targets;
use crate::signal::{ConnectionId, Signal};

/// An edge-triggered "something changed" flag.
pub struct ChangeFlag {
    dirty: AtomicBool,
    pending: AtomicBool,
    batch_depth: AtomicUsize,
    notify_count: AtomicU64,
    batch_lock: ReentrantMutex<()>,
    invalidated: Signal<()>,
}

impl Default for ChangeFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFlag {
    /// Create a clear flag with no subscribers.
    pub fn new() -> Self {
        Self {
            dirty: AtomicBool::new(false),
            pending: AtomicBool::new(false),
            batch_depth: AtomicUsize::new(0),
            notify_count: AtomicU64::new(0),
            batch_lock: ReentrantMutex::new(()),
            invalidated: Signal::new(),
        }
    }

    /// Record a change.
    ///
    /// Outside a batch the change is published immediately. Inside a batch
    /// opened on this thread it is deferred until the outermost
    /// [`BatchGuard`] drops. A batch open on another thread blocks the call
    /// until it commits.
    pub fn mark(&self) {
        let _lock = self.batch_lock.lock();
        if self.batch_depth.load(Ordering::SeqCst) > 0 {
            self.pending.store(true, Ordering::SeqCst);
            tracing::trace!(target: targets::CHANGE, "change deferred by open batch");
            return;
        }
        self.publish();
    }

    /// Return whether a change was published since the last read, clearing
    /// the flag.
    pub fn take(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    /// Peek at the flag without clearing it.
    pub fn is_set(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the flag without reading it.
    pub fn clear(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Whether a batch is currently open.
    pub fn is_batching(&self) -> bool {
        self.batch_depth.load(Ordering::SeqCst) > 0
    }

    /// Number of times `invalidated` fired over the flag's lifetime.
    pub fn notify_count(&self) -> u64 {
        self.notify_count.load(Ordering::SeqCst)
    }

    /// The signal emitted on each clear-to-set transition.
    pub fn invalidated(&self) -> &Signal<()> {
        &self.invalidated
    }

    /// Open a batch. Changes marked while the guard is alive are coalesced
    /// into a single notification when the outermost guard drops.
    pub fn batch(&self) -> BatchGuard<'_> {
        let lock = self.batch_lock.lock();
        self.batch_depth.fetch_add(1, Ordering::SeqCst);
        BatchGuard {
            flag: self,
            _lock: lock,
        }
    }

    /// Mark this flag whenever `signal` is emitted.
    ///
    /// The connection holds only a weak reference, so it never keeps the flag
    /// alive and becomes inert once the flag is dropped.
    pub fn track<T: 'static>(self: &Arc<Self>, signal: &Signal<T>) -> ConnectionId {
        let weak: Weak<Self> = Arc::downgrade(self);
        signal.connect(move |_| {
            if let Some(flag) = weak.upgrade() {
                flag.mark();
            }
        })
    }

    fn publish(&self) {
        if self.dirty.swap(true, Ordering::SeqCst) {
            tracing::trace!(target: targets::CHANGE, "already set, awaiting read");
            return;
        }
        let count = self.notify_count.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(target: targets::CHANGE, count, "publishing change");
        self.invalidated.emit(());
    }
}

impl std::fmt::Debug for ChangeFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeFlag")
            .field("dirty", &self.is_set())
            .field("batching", &self.is_batching())
            .field("notify_count", &self.notify_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(ChangeFlag: Send, Sync);

/// Scope guard returned by [`ChangeFlag::batch`].
pub struct BatchGuard<'a> {
    flag: &'a ChangeFlag,
    _lock: ReentrantMutexGuard<'a, ()>,
}

impl BatchGuard<'_> {
    /// Record a change for this batch even if no field reports one.
    ///
    /// Used by "commit" operations that must publish a cycle even when every
    /// re-applied value equals the current one.
    pub fn touch(&self) {
        self.flag.pending.store(true, Ordering::SeqCst);
    }
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        let previous = self.flag.batch_depth.fetch_sub(1, Ordering::SeqCst);
        if previous == 1 && self.flag.pending.swap(false, Ordering::SeqCst) {
            tracing::debug!(target: targets::CHANGE, "batch committed");
            self.flag.publish();
        }
    }
}
