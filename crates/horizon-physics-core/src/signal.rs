//! Synchronous signals.
//!
//! A [`Signal<Args>`] holds callbacks ("slots") and calls each of them with a
//! borrowed `Args` whenever it is emitted. Every observable model in the
//! workspace reports mutations this way.
//!
//! Slots run on the emitting thread after the slot table lock is released, so
//! a slot may connect, disconnect or re-emit on its own signal. A slot added
//! during an emission first runs on the next one.
//!
//! ```
//! use horizon_physics_core::Signal;
//!
//! let pressure_changed = Signal::<f64>::new();
//! let id = pressure_changed.connect(|pa| println!("pressure: {pa} Pa"));
//!
//! pressure_changed.emit(101_325.0);
//! assert!(pressure_changed.disconnect(id));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Key of one connected slot, returned by [`Signal::connect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A list of slots invoked on [`emit`](Self::emit).
///
/// `Signal` is `Send + Sync` for any `Args`: it never stores an `Args`, and
/// slots must themselves be `Send + Sync`.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// A signal with no slots.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Add `slot`; keep the returned id to remove it later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Remove one slot. `false` if `id` was not connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Remove every slot.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }

    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// While blocked, [`emit`](Self::emit) is a no-op.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Call every slot with `args`.
    #[tracing::instrument(skip_all, target = "horizon_physics_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "blocked");
            return;
        }

        let snapshot: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, slots = snapshot.len(), "emit");

        for slot in &snapshot {
            slot(&args);
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.slots.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<f64>: Send, Sync);

/// Keeps one slot connected for the guard's lifetime.
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use horizon_physics_core::{ConnectionGuard, Signal};
///
/// let unit_changed = Arc::new(Signal::<&'static str>::new());
/// let refreshes = Arc::new(AtomicUsize::new(0));
/// {
///     let refreshes = refreshes.clone();
///     let _view = ConnectionGuard::new(&unit_changed, move |_| {
///         refreshes.fetch_add(1, Ordering::SeqCst);
///     });
///     unit_changed.emit("Feet");
/// }
/// unit_changed.emit("Meters");
/// assert_eq!(refreshes.load(Ordering::SeqCst), 1);
/// ```
pub struct ConnectionGuard<Args: 'static> {
    signal: Arc<Signal<Args>>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<Args> {
    /// Connect `slot` to `signal`, disconnecting again when the guard drops.
    pub fn new<F>(signal: &Arc<Signal<Args>>, slot: F) -> Self
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = signal.connect(slot);
        Self {
            signal: Arc::clone(signal),
            id,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}
