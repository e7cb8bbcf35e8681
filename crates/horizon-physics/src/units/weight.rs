//! Weight (mass) units. Canonical unit: kilograms.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::{Affine, ConversionTable, DimensionKind, Unit, UnitKind};
use crate::error::UnitError;

/// Units of mass, named "weight" as in everyday use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Kilograms,
    Grams,
    Pounds,
    Ounces,
}

static WEIGHT_TABLE: LazyLock<ConversionTable<WeightUnit>> = LazyLock::new(ConversionTable::build);

impl UnitKind for WeightUnit {
    const DIMENSION: DimensionKind = DimensionKind::Weight;
    const CANONICAL: Self = Self::Kilograms;
    const ALL: &'static [Self] = &[Self::Kilograms, Self::Grams, Self::Pounds, Self::Ounces];

    fn affine(self) -> Option<Affine> {
        Some(match self {
            Self::Kilograms => Affine::IDENTITY,
            Self::Grams => Affine::scale(0.001),
            Self::Pounds => Affine::scale(0.453_592_37),
            Self::Ounces => Affine::scale(0.453_592_37 / 16.0),
        })
    }

    fn label(self) -> &'static str {
        match self {
            Self::Kilograms => "Kilograms",
            Self::Grams => "Grams",
            Self::Pounds => "Pounds",
            Self::Ounces => "Ounces",
        }
    }

    fn abbreviation(self) -> &'static str {
        match self {
            Self::Kilograms => "kg",
            Self::Grams => "g",
            Self::Pounds => "lb",
            Self::Ounces => "oz",
        }
    }

    fn canonical_str(self) -> &'static str {
        self.label()
    }

    fn table() -> &'static ConversionTable<Self> {
        &WEIGHT_TABLE
    }

    fn from_unit(unit: Unit) -> Option<Self> {
        match unit {
            Unit::Weight(u) => Some(u),
            _ => None,
        }
    }
}

impl From<WeightUnit> for Unit {
    fn from(unit: WeightUnit) -> Self {
        Unit::Weight(unit)
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_str())
    }
}

impl FromStr for WeightUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s)
    }
}
