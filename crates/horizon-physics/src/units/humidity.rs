//! Humidity units. Canonical unit: relative humidity in percent.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::{Affine, ConversionTable, DimensionKind, Unit, UnitKind};
use crate::error::UnitError;

/// Ways of expressing the water content of air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumidityUnit {
    #[default]
    Relative,
    Molar,
}

static HUMIDITY_TABLE: LazyLock<ConversionTable<HumidityUnit>> =
    LazyLock::new(ConversionTable::build);

impl UnitKind for HumidityUnit {
    const DIMENSION: DimensionKind = DimensionKind::Humidity;
    const CANONICAL: Self = Self::Relative;
    const ALL: &'static [Self] = &[Self::Relative, Self::Molar];

    fn affine(self) -> Option<Affine> {
        match self {
            Self::Relative => Some(Affine::IDENTITY),
            // TODO: molar humidity needs saturation vapor pressure, which
            // depends on temperature and pressure, so it is not affine.
            Self::Molar => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Relative => "Relative Humidity",
            Self::Molar => "Molar Humidity",
        }
    }

    fn abbreviation(self) -> &'static str {
        match self {
            Self::Relative => "%",
            Self::Molar => "mol/mol",
        }
    }

    fn canonical_str(self) -> &'static str {
        match self {
            Self::Relative => "Relative",
            Self::Molar => "Molar",
        }
    }

    fn table() -> &'static ConversionTable<Self> {
        &HUMIDITY_TABLE
    }

    fn from_unit(unit: Unit) -> Option<Self> {
        match unit {
            Unit::Humidity(u) => Some(u),
            _ => None,
        }
    }
}

impl From<HumidityUnit> for Unit {
    fn from(unit: HumidityUnit) -> Self {
        Unit::Humidity(unit)
    }
}

impl fmt::Display for HumidityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_str())
    }
}

impl FromStr for HumidityUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s)
    }
}
