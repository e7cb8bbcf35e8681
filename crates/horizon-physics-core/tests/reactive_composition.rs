//! Integration tests composing signals, properties and change flags.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_physics_core::{ChangeFlag, ConnectionGuard, Property, Signal};
use parking_lot::Mutex;

// A two-field model wired the way the settings models are: per-field
// signals tracked by one aggregate flag.
struct Pair {
    left: Property<i32>,
    right: Property<i32>,
    left_changed: Signal<i32>,
    right_changed: Signal<i32>,
    changed: Arc<ChangeFlag>,
}

impl Pair {
    fn new() -> Self {
        let pair = Self {
            left: Property::new(0),
            right: Property::new(0),
            left_changed: Signal::new(),
            right_changed: Signal::new(),
            changed: Arc::new(ChangeFlag::new()),
        };
        pair.changed.track(&pair.left_changed);
        pair.changed.track(&pair.right_changed);
        pair
    }

    fn set_left(&self, v: i32) {
        if self.left.set(v) {
            self.left_changed.emit(v);
        }
    }

    fn set_right(&self, v: i32) {
        if self.right.set(v) {
            self.right_changed.emit(v);
        }
    }

    fn set_both(&self, l: i32, r: i32) {
        let batch = self.changed.batch();
        batch.touch();
        self.set_left(l);
        self.set_right(r);
    }
}

#[test]
fn field_signals_feed_aggregate_flag() {
    let pair = Pair::new();
    pair.set_left(1);
    pair.set_right(2);
    // Unread, so the second field change is absorbed.
    assert_eq!(pair.changed.notify_count(), 1);
    assert!(pair.changed.take());
    assert!(!pair.changed.take());

    pair.set_right(3);
    assert_eq!(pair.changed.notify_count(), 2);
}

#[test]
fn unread_flag_invalidates_once_for_many_setters() {
    let pair = Pair::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_clone = hits.clone();
    pair.changed.invalidated().connect(move |_| {
        hits_clone.fetch_add(1, Ordering::SeqCst);
    });

    pair.set_left(1);
    pair.set_right(2);
    pair.set_left(3);
    pair.set_both(4, 5);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(pair.changed.is_set());
}

#[test]
fn batch_publishes_single_cycle() {
    let pair = Pair::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_clone = hits.clone();
    pair.changed.invalidated().connect(move |_| {
        hits_clone.fetch_add(1, Ordering::SeqCst);
    });

    pair.set_both(5, 6);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(pair.changed.take());

    // Same values: still one cycle, because the batch was touched.
    pair.set_both(5, 6);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn per_field_subscribers_still_see_every_change_inside_batch() {
    let pair = Pair::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    pair.left_changed.connect(move |v| seen_clone.lock().push(*v));

    pair.set_both(3, 4);
    assert_eq!(*seen.lock(), vec![3]);
}

#[test]
fn refresh_handler_does_not_loop() {
    // A handler that reads (and clears) the flag must not retrigger itself.
    let pair = Arc::new(Pair::new());
    let refreshes = Arc::new(AtomicUsize::new(0));

    let weak = Arc::downgrade(&pair);
    let refreshes_clone = refreshes.clone();
    pair.changed.invalidated().connect(move |_| {
        if let Some(pair) = weak.upgrade() {
            if pair.changed.take() {
                refreshes_clone.fetch_add(1, Ordering::SeqCst);
                // Re-applying the current value is a no-op.
                pair.set_left(pair.left.get());
            }
        }
    });

    pair.set_left(7);
    assert_eq!(refreshes.load(Ordering::SeqCst), 1);
}

#[test]
fn connection_guard_scopes_subscription() {
    let signal = Arc::new(Signal::<u8>::new());
    let hits = Arc::new(AtomicUsize::new(0));
    {
        let hits_clone = hits.clone();
        let _guard = ConnectionGuard::new(&signal, move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });
        signal.emit(1);
    }
    signal.emit(2);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(signal.connection_count(), 0);
}
