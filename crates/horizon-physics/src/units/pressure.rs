//! Pressure units. Canonical unit: pascals.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::constants::PRESSURE_REFERENCE_PA;
use super::{Affine, ConversionTable, DimensionKind, Unit, UnitKind};
use crate::error::UnitError;

/// Units of pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureUnit {
    Kilopascals,
    #[default]
    Pascals,
    Millibars,
    Atmospheres,
}

static PRESSURE_TABLE: LazyLock<ConversionTable<PressureUnit>> =
    LazyLock::new(ConversionTable::build);

impl UnitKind for PressureUnit {
    const DIMENSION: DimensionKind = DimensionKind::Pressure;
    const CANONICAL: Self = Self::Pascals;
    const ALL: &'static [Self] = &[
        Self::Kilopascals,
        Self::Pascals,
        Self::Millibars,
        Self::Atmospheres,
    ];

    fn affine(self) -> Option<Affine> {
        Some(match self {
            Self::Kilopascals => Affine::scale(1000.0),
            Self::Pascals => Affine::IDENTITY,
            Self::Millibars => Affine::scale(100.0),
            Self::Atmospheres => Affine::scale(PRESSURE_REFERENCE_PA),
        })
    }

    fn label(self) -> &'static str {
        match self {
            Self::Kilopascals => "Kilopascals",
            Self::Pascals => "Pascals",
            Self::Millibars => "Millibars",
            Self::Atmospheres => "Atmospheres",
        }
    }

    fn abbreviation(self) -> &'static str {
        match self {
            Self::Kilopascals => "kPa",
            Self::Pascals => "Pa",
            Self::Millibars => "mb",
            Self::Atmospheres => "atm",
        }
    }

    fn canonical_str(self) -> &'static str {
        self.label()
    }

    fn table() -> &'static ConversionTable<Self> {
        &PRESSURE_TABLE
    }

    fn from_unit(unit: Unit) -> Option<Self> {
        match unit {
            Unit::Pressure(u) => Some(u),
            _ => None,
        }
    }
}

impl From<PressureUnit> for Unit {
    fn from(unit: PressureUnit) -> Self {
        Unit::Pressure(unit)
    }
}

impl fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_str())
    }
}

impl FromStr for PressureUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s)
    }
}
