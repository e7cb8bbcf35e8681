//! Core reactive primitives for Horizon Physics.
//!
//! This crate provides the framework-independent building blocks that the
//! observable physics models are made of:
//!
//! - **Signal/Slot System**: Type-safe, synchronous observer notification
//! - **Property System**: Value cells with change detection
//! - **Change Flags**: Edge-triggered dirty flags with batch coalescing
//! - **Logging**: `tracing` targets and helper macros
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_physics_core::Signal;
//!
//! let temperature_changed = Signal::<f64>::new();
//!
//! let conn_id = temperature_changed.connect(|kelvin| {
//!     println!("Temperature changed to: {kelvin} K");
//! });
//!
//! temperature_changed.emit(293.15);
//! temperature_changed.disconnect(conn_id);
//! ```
//!
//! # Change Flag Example
//!
//! ```
//! use horizon_physics_core::{ChangeFlag, Property};
//!
//! struct Units {
//!     distance: Property<&'static str>,
//!     angle: Property<&'static str>,
//!     changed: ChangeFlag,
//! }
//!
//! impl Units {
//!     fn set_all(&self, distance: &'static str, angle: &'static str) {
//!         let _batch = self.changed.batch();
//!         if self.distance.set(distance) {
//!             self.changed.mark();
//!         }
//!         if self.angle.set(angle) {
//!             self.changed.mark();
//!         }
//!     }
//! }
//!
//! let units = Units {
//!     distance: Property::new("m"),
//!     angle: Property::new("rad"),
//!     changed: ChangeFlag::new(),
//! };
//! units.set_all("ft", "deg");
//! assert_eq!(units.changed.notify_count(), 1);
//! assert!(units.changed.take());
//! ```

pub mod change;
pub mod logging;
pub mod property;
pub mod signal;

#[doc(hidden)]
pub use tracing;

pub use change::{BatchGuard, ChangeFlag};
pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
