//! Property system for Horizon Physics.
//!
//! A [`Property<T>`] is a value cell with change detection. It does not emit
//! anything by itself; the owner pairs it with a [`Signal`](crate::Signal) and
//! emits when [`Property::set`] reports a change.
//!
//! # Example
//!
//! ```
//! use horizon_physics_core::{Property, Signal};
//!
//! struct Humidity {
//!     percent: Property<f64>,
//!     percent_changed: Signal<f64>,
//! }
//!
//! impl Humidity {
//!     fn set_percent(&self, value: f64) {
//!         if self.percent.set(value) {
//!             self.percent_changed.emit(value);
//!         }
//!     }
//! }
//!
//! let humidity = Humidity { percent: Property::new(50.0), percent_changed: Signal::new() };
//! humidity.set_percent(65.0);
//! assert_eq!(humidity.percent.get(), 65.0);
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A lock-protected value that reports whether writes change it.
///
/// Reads clone the value; [`with`](Self::with) borrows it instead. The cell is
/// `Send + Sync` whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Wrap `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Borrow the value for the duration of `f`.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Overwrite the value without comparing.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value` if it differs from the current one. Returns `true` when
    /// stored; the owner emits its change signal in that case.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Like [`set`](Self::set), but hands back the displaced value.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    /// Clones the current value into a new, independent cell.
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_set_reports_only_real_changes() {
        let kelvin = Property::new(293.15);

        assert!(!kelvin.set(293.15));
        assert!(kelvin.set(300.0));
        assert!(!kelvin.set(300.0));
        assert_eq!(kelvin.get(), 300.0);
    }

    #[test]
    fn test_set_silent_overwrites_equal_or_not() {
        let attenuation = Property::new(true);
        attenuation.set_silent(false);
        assert!(!attenuation.get());
    }

    #[test]
    fn test_replace_returns_displaced_value() {
        let prop = Property::new("kelvin".to_string());

        assert!(prop.replace("kelvin".to_string()).is_none());

        let old = prop.replace("celsius".to_string());
        assert_eq!(old, Some("kelvin".to_string()));
        assert_eq!(prop.get(), "celsius");
    }

    #[test]
    fn test_with_borrows() {
        let samples = Property::new(vec![101_325.0, 100_000.0]);
        let max = samples.with(|v| v.iter().copied().fold(f64::MIN, f64::max));
        assert_eq!(max, 101_325.0);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Property::new(1.0);
        let copy = original.clone();

        copy.set(2.0);
        assert_eq!(original.get(), 1.0);
        assert_eq!(copy.get(), 2.0);
    }

    #[test]
    fn test_concurrent_sets_report_each_transition_once() {
        // Each thread flips the cell to its own id; a transition is only
        // counted by the writer that made it.
        let cell = Arc::new(Property::new(usize::MAX));

        let handles: Vec<_> = (0..8)
            .map(|id| {
                let cell = cell.clone();
                std::thread::spawn(move || (0..50).filter(|_| cell.set(id)).count())
            })
            .collect();

        let transitions: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert!(transitions >= 1);
        assert!(cell.get() < 8);
    }

    #[test]
    fn test_default_and_debug() {
        let cell: Property<f64> = Property::default();
        assert_eq!(cell.get(), 0.0);
        assert_eq!(format!("{cell:?}"), "Property { value: 0.0 }");
    }
}
