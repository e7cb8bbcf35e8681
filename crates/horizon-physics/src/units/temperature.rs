//! Temperature units. Canonical unit: kelvin.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::constants::CELSIUS_KELVIN_OFFSET;
use super::{Affine, ConversionTable, DimensionKind, Unit, UnitKind};
use crate::error::UnitError;

/// Units of thermodynamic temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    Kelvin,
    #[default]
    Celsius,
    Fahrenheit,
}

static TEMPERATURE_TABLE: LazyLock<ConversionTable<TemperatureUnit>> =
    LazyLock::new(ConversionTable::build);

impl UnitKind for TemperatureUnit {
    const DIMENSION: DimensionKind = DimensionKind::Temperature;
    const CANONICAL: Self = Self::Kelvin;
    const ALL: &'static [Self] = &[Self::Kelvin, Self::Celsius, Self::Fahrenheit];

    fn affine(self) -> Option<Affine> {
        Some(match self {
            Self::Kelvin => Affine::IDENTITY,
            Self::Celsius => Affine::new(1.0, CELSIUS_KELVIN_OFFSET),
            // K = (F - 32) * 5/9 + 273.15
            Self::Fahrenheit => Affine::new(5.0 / 9.0, CELSIUS_KELVIN_OFFSET - 32.0 * 5.0 / 9.0),
        })
    }

    fn label(self) -> &'static str {
        match self {
            Self::Kelvin => "Kelvin",
            Self::Celsius => "Degrees Celsius",
            Self::Fahrenheit => "Degrees Fahrenheit",
        }
    }

    fn abbreviation(self) -> &'static str {
        match self {
            Self::Kelvin => "K",
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    fn canonical_str(self) -> &'static str {
        match self {
            Self::Kelvin => "Kelvin",
            Self::Celsius => "Celsius",
            Self::Fahrenheit => "Fahrenheit",
        }
    }

    fn table() -> &'static ConversionTable<Self> {
        &TEMPERATURE_TABLE
    }

    fn from_unit(unit: Unit) -> Option<Self> {
        match unit {
            Unit::Temperature(u) => Some(u),
            _ => None,
        }
    }
}

impl From<TemperatureUnit> for Unit {
    fn from(unit: TemperatureUnit) -> Self {
        Unit::Temperature(unit)
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_str())
    }
}

impl FromStr for TemperatureUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s)
    }
}
