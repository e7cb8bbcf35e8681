//! Observable settings models.
//!
//! - [`NaturalEnvironment`]: ambient temperature, humidity, pressure and the
//!   air attenuation switch.
//! - [`MeasurementUnits`]: the display unit chosen per dimension.
//! - [`Extents2D`]: a plain rectangle in meters.
//!
//! The first two implement [`CompositeSettings`]: one aggregate change flag
//! per model, with bulk updates coalesced into a single notification.

mod composite;
mod extents;
mod measurement_units;
mod natural_environment;

pub use composite::CompositeSettings;
pub use extents::{Bounds2D, Extents2D};
pub use measurement_units::{MeasurementUnits, MeasurementUnitsValues};
pub use natural_environment::{NaturalEnvironment, NaturalEnvironmentValues};
