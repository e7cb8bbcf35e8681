//! Measurement units and the conversion function table.
//!
//! Every physical dimension has a unit enum implementing [`UnitKind`]. Values
//! of a dimension are stored in its canonical unit and converted through the
//! dimension's [`ConversionTable`].
//!
//! # Related
//!
//! - [`crate::UnitQuantity`] - Observable quantity stored in a canonical unit
//! - [`crate::MeasurementUnits`] - The display-unit registry
//!
//! # Example
//!
//! ```
//! use horizon_physics::units::{convert_pressure, PressureUnit, Unit};
//!
//! let atm = convert_pressure(101_325.0, PressureUnit::Pascals, PressureUnit::Atmospheres)?;
//! assert!((atm - 1.0).abs() < 1e-12);
//!
//! let unit: Unit = "temperature:celsius".parse()?;
//! assert_eq!(unit.to_string(), "temperature:Celsius");
//! # Ok::<(), horizon_physics::UnitError>(())
//! ```

mod angle;
pub mod constants;
mod distance;
mod humidity;
mod pressure;
mod table;
mod temperature;
mod weight;

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use angle::AngleUnit;
pub use distance::DistanceUnit;
pub use humidity::HumidityUnit;
pub use pressure::PressureUnit;
pub use table::{Affine, ConversionTable};
pub use temperature::TemperatureUnit;
pub use weight::WeightUnit;

use crate::error::{UnitError, UnitResult};

/// The physical dimensions known to the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    Distance,
    Angle,
    Weight,
    Temperature,
    Pressure,
    Humidity,
}

impl DimensionKind {
    /// Every dimension, in display order.
    pub const ALL: &'static [Self] = &[
        Self::Distance,
        Self::Angle,
        Self::Weight,
        Self::Temperature,
        Self::Pressure,
        Self::Humidity,
    ];

    /// Lower-case name used in messages and unit strings.
    pub fn name(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Angle => "angle",
            Self::Weight => "weight",
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::Humidity => "humidity",
        }
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DimensionKind {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnitError::UnknownUnitName(s.to_string()))
    }
}

/// A unit enum for one physical dimension.
///
/// Implementors declare their conversion to the canonical unit with an
/// exhaustive `match` in [`affine`](Self::affine); the shared lookup table is
/// built from it on first use.
pub trait UnitKind:
    Copy + Eq + Hash + fmt::Debug + fmt::Display + Default + Send + Sync + Into<Unit> + 'static
{
    /// The dimension this unit measures.
    const DIMENSION: DimensionKind;
    /// The unit values are stored in.
    const CANONICAL: Self;
    /// Every member of the enum, in display order.
    const ALL: &'static [Self];

    /// Conversion into the canonical unit, or `None` if unsupported.
    fn affine(self) -> Option<Affine>;

    /// Human-readable name, e.g. "Degrees Celsius".
    fn label(self) -> &'static str;

    /// Short symbol, e.g. "°C".
    fn abbreviation(self) -> &'static str;

    /// Stable identifier, e.g. "Celsius".
    fn canonical_str(self) -> &'static str;

    /// The shared conversion table for this kind.
    fn table() -> &'static ConversionTable<Self>;

    /// Recover a unit of this kind from a dimension-erased [`Unit`].
    fn from_unit(unit: Unit) -> Option<Self>;

    /// Parse a canonical string, label, or abbreviation (case-insensitive).
    fn parse_name(name: &str) -> UnitResult<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|u| {
                u.canonical_str().eq_ignore_ascii_case(name)
                    || u.label().eq_ignore_ascii_case(name)
                    || u.abbreviation() == name
            })
            .or_else(|| {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|u| u.abbreviation().eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| UnitError::UnknownUnitName(name.to_string()))
    }
}

/// A unit of any dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "unit", rename_all = "snake_case")]
pub enum Unit {
    Distance(DistanceUnit),
    Angle(AngleUnit),
    Weight(WeightUnit),
    Temperature(TemperatureUnit),
    Pressure(PressureUnit),
    Humidity(HumidityUnit),
}

impl Unit {
    /// The dimension this unit measures.
    pub fn dimension(self) -> DimensionKind {
        match self {
            Self::Distance(_) => DimensionKind::Distance,
            Self::Angle(_) => DimensionKind::Angle,
            Self::Weight(_) => DimensionKind::Weight,
            Self::Temperature(_) => DimensionKind::Temperature,
            Self::Pressure(_) => DimensionKind::Pressure,
            Self::Humidity(_) => DimensionKind::Humidity,
        }
    }

    /// Stable identifier of the wrapped unit.
    pub fn canonical_str(self) -> &'static str {
        match self {
            Self::Distance(u) => u.canonical_str(),
            Self::Angle(u) => u.canonical_str(),
            Self::Weight(u) => u.canonical_str(),
            Self::Temperature(u) => u.canonical_str(),
            Self::Pressure(u) => u.canonical_str(),
            Self::Humidity(u) => u.canonical_str(),
        }
    }

    /// Short symbol of the wrapped unit.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Distance(u) => u.abbreviation(),
            Self::Angle(u) => u.abbreviation(),
            Self::Weight(u) => u.abbreviation(),
            Self::Temperature(u) => u.abbreviation(),
            Self::Pressure(u) => u.abbreviation(),
            Self::Humidity(u) => u.abbreviation(),
        }
    }

    fn parse_in(dimension: DimensionKind, name: &str) -> UnitResult<Self> {
        Ok(match dimension {
            DimensionKind::Distance => DistanceUnit::parse_name(name)?.into(),
            DimensionKind::Angle => AngleUnit::parse_name(name)?.into(),
            DimensionKind::Weight => WeightUnit::parse_name(name)?.into(),
            DimensionKind::Temperature => TemperatureUnit::parse_name(name)?.into(),
            DimensionKind::Pressure => PressureUnit::parse_name(name)?.into(),
            DimensionKind::Humidity => HumidityUnit::parse_name(name)?.into(),
        })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.dimension(), self.canonical_str())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    /// Parses `"dimension:name"`, or a bare name matched against every
    /// dimension in [`DimensionKind::ALL`] order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((dimension, name)) = s.split_once(':') {
            let dimension: DimensionKind = dimension.parse()?;
            return Self::parse_in(dimension, name);
        }
        DimensionKind::ALL
            .iter()
            .find_map(|&d| Self::parse_in(d, s).ok())
            .ok_or_else(|| UnitError::UnknownUnitName(s.trim().to_string()))
    }
}

/// Convert a temperature between units.
pub fn convert_temperature(
    value: f64,
    from: TemperatureUnit,
    to: TemperatureUnit,
) -> UnitResult<f64> {
    TemperatureUnit::table().convert(value, from, to)
}

/// Convert a pressure between units.
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> UnitResult<f64> {
    PressureUnit::table().convert(value, from, to)
}

/// Convert a distance between units.
pub fn convert_distance(value: f64, from: DistanceUnit, to: DistanceUnit) -> UnitResult<f64> {
    DistanceUnit::table().convert(value, from, to)
}

/// Convert an angle between units.
pub fn convert_angle(value: f64, from: AngleUnit, to: AngleUnit) -> UnitResult<f64> {
    AngleUnit::table().convert(value, from, to)
}

/// Convert a weight between units.
pub fn convert_weight(value: f64, from: WeightUnit, to: WeightUnit) -> UnitResult<f64> {
    WeightUnit::table().convert(value, from, to)
}

/// Validate every built-in conversion table.
pub fn validate_tables() -> UnitResult<()> {
    DistanceUnit::table().validate()?;
    AngleUnit::table().validate()?;
    WeightUnit::table().validate()?;
    TemperatureUnit::table().validate()?;
    PressureUnit::table().validate()?;
    HumidityUnit::table().validate()?;
    Ok(())
}
