//! Distance units. Canonical unit: meters.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::{Affine, ConversionTable, DimensionKind, Unit, UnitKind};
use crate::error::UnitError;

/// Units of length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    #[default]
    Meters,
    Centimeters,
    Millimeters,
    Kilometers,
    Inches,
    Feet,
    Yards,
    Miles,
}

static DISTANCE_TABLE: LazyLock<ConversionTable<DistanceUnit>> =
    LazyLock::new(ConversionTable::build);

impl UnitKind for DistanceUnit {
    const DIMENSION: DimensionKind = DimensionKind::Distance;
    const CANONICAL: Self = Self::Meters;
    const ALL: &'static [Self] = &[
        Self::Meters,
        Self::Centimeters,
        Self::Millimeters,
        Self::Kilometers,
        Self::Inches,
        Self::Feet,
        Self::Yards,
        Self::Miles,
    ];

    fn affine(self) -> Option<Affine> {
        // International yard and pound agreement (1959) definitions.
        Some(match self {
            Self::Meters => Affine::IDENTITY,
            Self::Centimeters => Affine::scale(0.01),
            Self::Millimeters => Affine::scale(0.001),
            Self::Kilometers => Affine::scale(1000.0),
            Self::Inches => Affine::scale(0.0254),
            Self::Feet => Affine::scale(0.3048),
            Self::Yards => Affine::scale(0.9144),
            Self::Miles => Affine::scale(1609.344),
        })
    }

    fn label(self) -> &'static str {
        match self {
            Self::Meters => "Meters",
            Self::Centimeters => "Centimeters",
            Self::Millimeters => "Millimeters",
            Self::Kilometers => "Kilometers",
            Self::Inches => "Inches",
            Self::Feet => "Feet",
            Self::Yards => "Yards",
            Self::Miles => "Miles",
        }
    }

    fn abbreviation(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Centimeters => "cm",
            Self::Millimeters => "mm",
            Self::Kilometers => "km",
            Self::Inches => "in",
            Self::Feet => "ft",
            Self::Yards => "yd",
            Self::Miles => "mi",
        }
    }

    fn canonical_str(self) -> &'static str {
        self.label()
    }

    fn table() -> &'static ConversionTable<Self> {
        &DISTANCE_TABLE
    }

    fn from_unit(unit: Unit) -> Option<Self> {
        match unit {
            Unit::Distance(u) => Some(u),
            _ => None,
        }
    }
}

impl From<DistanceUnit> for Unit {
    fn from(unit: DistanceUnit) -> Self {
        Unit::Distance(unit)
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_str())
    }
}

impl FromStr for DistanceUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s)
    }
}
