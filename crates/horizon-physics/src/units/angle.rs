//! Angle units. Canonical unit: radians.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::{Affine, ConversionTable, DimensionKind, Unit, UnitKind};
use crate::error::UnitError;

/// Units of plane angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleUnit {
    Radians,
    #[default]
    Degrees,
}

static ANGLE_TABLE: LazyLock<ConversionTable<AngleUnit>> = LazyLock::new(ConversionTable::build);

impl UnitKind for AngleUnit {
    const DIMENSION: DimensionKind = DimensionKind::Angle;
    const CANONICAL: Self = Self::Radians;
    const ALL: &'static [Self] = &[Self::Radians, Self::Degrees];

    fn affine(self) -> Option<Affine> {
        Some(match self {
            Self::Radians => Affine::IDENTITY,
            Self::Degrees => Affine::scale(PI / 180.0),
        })
    }

    fn label(self) -> &'static str {
        match self {
            Self::Radians => "Radians",
            Self::Degrees => "Degrees",
        }
    }

    fn abbreviation(self) -> &'static str {
        match self {
            Self::Radians => "rad",
            Self::Degrees => "°",
        }
    }

    fn canonical_str(self) -> &'static str {
        self.label()
    }

    fn table() -> &'static ConversionTable<Self> {
        &ANGLE_TABLE
    }

    fn from_unit(unit: Unit) -> Option<Self> {
        match unit {
            Unit::Angle(u) => Some(u),
            _ => None,
        }
    }
}

impl From<AngleUnit> for Unit {
    fn from(unit: AngleUnit) -> Self {
        Unit::Angle(unit)
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_str())
    }
}

impl FromStr for AngleUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s)
    }
}
