//! Conversion tables.
//!
//! Each unit kind declares its conversion to the canonical unit as an
//! exhaustive `match` in [`UnitKind::affine`]. [`ConversionTable::build`]
//! walks [`UnitKind::ALL`] once and stores the result in a lookup map, so a
//! missing case is a compile error and a malformed entry is caught by
//! [`ConversionTable::validate`].

use std::collections::HashMap;

use super::UnitKind;
use crate::error::{UnitError, UnitResult};

/// An affine map into the canonical unit: `canonical = value * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    /// Multiplicative factor.
    pub scale: f64,
    /// Additive offset, applied after scaling.
    pub offset: f64,
}

impl Affine {
    /// The identity conversion.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: 0.0,
    };

    /// A purely multiplicative conversion.
    pub const fn scale(scale: f64) -> Self {
        Self { scale, offset: 0.0 }
    }

    /// A conversion with both scale and offset (temperatures).
    pub const fn new(scale: f64, offset: f64) -> Self {
        Self { scale, offset }
    }

    /// Map a value expressed in this unit into the canonical unit.
    #[inline]
    pub fn to_canonical(self, value: f64) -> f64 {
        value * self.scale + self.offset
    }

    /// Map a canonical value into this unit.
    #[inline]
    pub fn from_canonical(self, canonical: f64) -> f64 {
        (canonical - self.offset) / self.scale
    }
}

/// Lookup table from unit to its canonical conversion.
#[derive(Debug, Clone)]
pub struct ConversionTable<U: UnitKind> {
    entries: HashMap<U, Affine>,
}

impl<U: UnitKind> ConversionTable<U> {
    /// Build the table from the unit kind's declared conversions.
    ///
    /// Units whose [`UnitKind::affine`] is `None` are left out and reported as
    /// unsupported on lookup.
    pub fn build() -> Self {
        let entries = U::ALL
            .iter()
            .filter_map(|&unit| unit.affine().map(|affine| (unit, affine)))
            .collect();
        Self { entries }
    }

    /// Check the table's invariants.
    ///
    /// The canonical unit must be present and map to the identity, and every
    /// entry must have a finite, non-zero scale and a finite offset.
    pub fn validate(&self) -> UnitResult<()> {
        match self.entries.get(&U::CANONICAL) {
            Some(affine) if *affine == Affine::IDENTITY => {}
            _ => {
                return Err(UnitError::InvalidConversion {
                    dimension: U::DIMENSION,
                    unit: U::CANONICAL.to_string(),
                    reason: "canonical unit must map to identity",
                });
            }
        }

        for (unit, affine) in &self.entries {
            if !affine.scale.is_finite() || affine.scale == 0.0 {
                return Err(UnitError::InvalidConversion {
                    dimension: U::DIMENSION,
                    unit: unit.to_string(),
                    reason: "scale must be finite and non-zero",
                });
            }
            if !affine.offset.is_finite() {
                return Err(UnitError::InvalidConversion {
                    dimension: U::DIMENSION,
                    unit: unit.to_string(),
                    reason: "offset must be finite",
                });
            }
        }
        Ok(())
    }

    /// Whether `unit` has a conversion entry.
    pub fn supports(&self, unit: U) -> bool {
        self.entries.contains_key(&unit)
    }

    /// Supported units, in declaration order.
    pub fn supported_units(&self) -> Vec<U> {
        U::ALL.iter().copied().filter(|u| self.supports(*u)).collect()
    }

    /// The conversion entry for `unit`.
    pub fn affine(&self, unit: U) -> UnitResult<Affine> {
        self.entries
            .get(&unit)
            .copied()
            .ok_or_else(|| UnitError::unsupported(U::DIMENSION, unit))
    }

    /// Convert `value` in `unit` into the canonical unit.
    pub fn to_canonical(&self, value: f64, unit: U) -> UnitResult<f64> {
        Ok(self.affine(unit)?.to_canonical(value))
    }

    /// Convert a canonical value into `unit`.
    pub fn from_canonical(&self, canonical: f64, unit: U) -> UnitResult<f64> {
        Ok(self.affine(unit)?.from_canonical(canonical))
    }

    /// Convert `value` from one unit to another.
    pub fn convert(&self, value: f64, from: U, to: U) -> UnitResult<f64> {
        if from == to {
            // Still reject unsupported units.
            self.affine(from)?;
            return Ok(value);
        }
        let canonical = self.to_canonical(value, from)?;
        self.from_canonical(canonical, to)
    }

    /// The multiplicative factor from `from` to `to`.
    ///
    /// Fails with [`UnitError::InvalidConversion`] if either unit carries an
    /// offset, since no single factor relates such units. Use
    /// [`convert`](Self::convert) for those.
    pub fn factor(&self, from: U, to: U) -> UnitResult<f64> {
        let (source, target) = (self.affine(from)?, self.affine(to)?);
        for (unit, affine) in [(from, source), (to, target)] {
            if affine.offset != 0.0 {
                return Err(UnitError::InvalidConversion {
                    dimension: U::DIMENSION,
                    unit: unit.to_string(),
                    reason: "offset conversion has no scale factor",
                });
            }
        }
        Ok(source.scale / target.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{DimensionKind, DistanceUnit, HumidityUnit, TemperatureUnit};

    #[test]
    fn test_affine_round_trip() {
        let fahrenheit = Affine::new(5.0 / 9.0, 255.372_222_222_222_2);
        let kelvin = fahrenheit.to_canonical(212.0);
        assert!((kelvin - 373.15).abs() < 1e-9);
        assert!((fahrenheit.from_canonical(kelvin) - 212.0).abs() < 1e-9);
    }

    #[test]
    fn test_unsupported_entry_is_left_out() {
        let table = ConversionTable::<HumidityUnit>::build();
        assert!(table.supports(HumidityUnit::Relative));
        assert!(!table.supports(HumidityUnit::Molar));
        assert_eq!(table.supported_units(), vec![HumidityUnit::Relative]);
        assert!(matches!(
            table.to_canonical(1.0, HumidityUnit::Molar),
            Err(UnitError::UnsupportedUnit { .. })
        ));
    }

    #[test]
    fn test_convert_same_unit_checks_support() {
        let table = ConversionTable::<HumidityUnit>::build();
        assert_eq!(
            table.convert(40.0, HumidityUnit::Relative, HumidityUnit::Relative),
            Ok(40.0)
        );
        assert!(
            table
                .convert(40.0, HumidityUnit::Molar, HumidityUnit::Molar)
                .is_err()
        );
    }

    #[test]
    fn test_factor() {
        let table = ConversionTable::<DistanceUnit>::build();
        let factor = table.factor(DistanceUnit::Feet, DistanceUnit::Inches).unwrap();
        assert!((factor - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_factor_rejects_offset_units() {
        let table = ConversionTable::<TemperatureUnit>::build();
        let err = table
            .factor(TemperatureUnit::Celsius, TemperatureUnit::Kelvin)
            .unwrap_err();
        assert!(matches!(
            err,
            UnitError::InvalidConversion { dimension: DimensionKind::Temperature, .. }
        ));
        assert!(
            table
                .factor(TemperatureUnit::Kelvin, TemperatureUnit::Fahrenheit)
                .is_err()
        );
        assert_eq!(
            table.factor(TemperatureUnit::Kelvin, TemperatureUnit::Kelvin).unwrap(),
            1.0
        );
    }

    #[test]
    fn test_validate_accepts_builtin_tables() {
        assert!(ConversionTable::<TemperatureUnit>::build().validate().is_ok());
        assert!(ConversionTable::<DistanceUnit>::build().validate().is_ok());
    }
}
