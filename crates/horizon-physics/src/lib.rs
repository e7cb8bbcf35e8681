//! Horizon Physics - unit-aware observable physics settings.
//!
//! Physical quantities are stored in one canonical unit per dimension and
//! read or written in any supported unit. Settings models built on them
//! report changes through edge-triggered flags, with bulk updates coalesced
//! into a single notification.
//!
//! - [`units`]: unit enums per dimension and their conversion tables
//! - [`UnitQuantity`]: one observable quantity
//! - [`NaturalEnvironment`], [`MeasurementUnits`]: composite settings models
//! - [`Extents2D`]: a plain rectangle in meters
//! - [`PhysicsSettings`]: TOML/JSON persistence for all of the above
//!
//! The reactive primitives ([`Signal`], [`ChangeFlag`], [`Property`]) come from
//! `horizon-physics-core` and are re-exported here.
//!
//! # Example
//!
//! ```
//! use horizon_physics::{CompositeSettings, NaturalEnvironment, TemperatureUnit};
//!
//! let env = NaturalEnvironment::new();
//! env.changed().invalidated().connect(|_| println!("environment changed"));
//!
//! env.set_temperature(25.0, TemperatureUnit::Celsius);
//! assert!(env.is_changed());
//!
//! CompositeSettings::reset(&env);
//! assert!((env.temperature(TemperatureUnit::Kelvin)? - 293.15).abs() < 1e-9);
//! # Ok::<(), horizon_physics::UnitError>(())
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod quantity;
pub mod units;

pub use horizon_physics_core::{
    BatchGuard, ChangeFlag, ConnectionGuard, ConnectionId, PerfSpan, Property, Signal,
    physics_debug, physics_error, physics_info, physics_trace, physics_warn,
};

pub use config::{PhysicsSettings, SettingsFormat};
pub use error::{ConfigError, ConfigResult, UnitError, UnitResult};
pub use model::{
    Bounds2D, CompositeSettings, Extents2D, MeasurementUnits, MeasurementUnitsValues,
    NaturalEnvironment, NaturalEnvironmentValues,
};
pub use quantity::{Angle, Dimension, Distance, Humidity, Pressure, Temperature, UnitQuantity, Weight};
pub use units::{
    AngleUnit, DimensionKind, DistanceUnit, HumidityUnit, PressureUnit, TemperatureUnit, Unit,
    UnitKind, WeightUnit,
};
