//! Two-dimensional extents in meters.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::UnitResult;
use crate::units::{DistanceUnit, UnitKind};

/// An axis-aligned rectangle, stored in meters by convention.
///
/// Unlike the composite models this is a plain value: no change notification.
///
/// ```
/// use horizon_physics::{DistanceUnit, Extents2D};
///
/// let extents = Extents2D::default();
/// let feet = extents.convert(DistanceUnit::Meters, DistanceUnit::Feet)?;
/// assert!((feet.width - 131.2335958).abs() < 1e-6);
/// # Ok::<(), horizon_physics::UnitError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extents2D {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Extents2D {
    pub const X_DEFAULT: f64 = 0.0;
    pub const Y_DEFAULT: f64 = 0.0;
    pub const WIDTH_DEFAULT: f64 = 40.0;
    pub const HEIGHT_DEFAULT: f64 = 20.0;

    /// Create extents from origin and size.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create extents spanning two corners.
    #[inline]
    pub fn from_corners(min: DVec2, max: DVec2) -> Self {
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Overwrite all four fields.
    pub fn set_extents(&mut self, x: f64, y: f64, width: f64, height: f64) {
        *self = Self::new(x, y, width, height);
    }

    /// The origin corner.
    #[inline]
    pub fn min_point(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// The corner opposite the origin.
    #[inline]
    pub fn max_point(&self) -> DVec2 {
        DVec2::new(self.x + self.width, self.y + self.height)
    }

    /// Width and height as a vector.
    #[inline]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Scale every field by the factor from `from` to `to`.
    ///
    /// Converting back with the units swapped restores the original within
    /// floating-point tolerance.
    pub fn convert(&self, from: DistanceUnit, to: DistanceUnit) -> UnitResult<Self> {
        let factor = DistanceUnit::table().factor(from, to)?;
        Ok(self.scaled(factor))
    }

    /// Interpret `self` as expressed in `unit` and convert it to meters.
    pub fn to_meters(&self, unit: DistanceUnit) -> UnitResult<Self> {
        self.convert(unit, DistanceUnit::Meters)
    }

    /// Express meter-based extents in `unit`.
    pub fn in_unit(&self, unit: DistanceUnit) -> UnitResult<Self> {
        self.convert(DistanceUnit::Meters, unit)
    }

    fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

impl Default for Extents2D {
    fn default() -> Self {
        Self::new(
            Self::X_DEFAULT,
            Self::Y_DEFAULT,
            Self::WIDTH_DEFAULT,
            Self::HEIGHT_DEFAULT,
        )
    }
}

/// Min/max form of a rectangle, as used by bounds computations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: DVec2,
    pub max: DVec2,
}

impl From<Bounds2D> for Extents2D {
    fn from(bounds: Bounds2D) -> Self {
        Self::from_corners(bounds.min, bounds.max)
    }
}

impl From<Extents2D> for Bounds2D {
    fn from(extents: Extents2D) -> Self {
        Self {
            min: extents.min_point(),
            max: extents.max_point(),
        }
    }
}

impl From<[f64; 4]> for Extents2D {
    /// `[x, y, width, height]`.
    fn from([x, y, width, height]: [f64; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<Extents2D> for [f64; 4] {
    fn from(extents: Extents2D) -> Self {
        [extents.x, extents.y, extents.width, extents.height]
    }
}
