//! Observable physical quantities stored in a canonical unit.
//!
//! A [`UnitQuantity<D>`] holds one value of dimension `D` in `D`'s canonical
//! unit (kelvin, pascals, meters, ...). Callers read and write it in any
//! supported unit of that dimension; the canonical value is the single source
//! of truth and every unit-specific view is derived from it.
//!
//! Separately, each quantity carries a *display unit*: the unit a view
//! currently presents. Changing the display unit never changes the stored
//! value.
//!
//! # Failure policy
//!
//! - Getters return [`UnitResult`]; an unsupported unit is always surfaced.
//! - [`UnitQuantity::try_set`] returns the same errors for writes.
//! - [`UnitQuantity::set`] is the lenient form: an unsupported unit or an
//!   out-of-range value is logged at `warn` and ignored, leaving the previous
//!   value in place.
//!
//! # Example
//!
//! ```
//! use horizon_physics::{Temperature, TemperatureUnit, UnitQuantity};
//!
//! let temperature = UnitQuantity::<Temperature>::new();
//! temperature.set(25.0, TemperatureUnit::Celsius);
//! assert!((temperature.canonical() - 298.15).abs() < 1e-9);
//! assert!((temperature.get(TemperatureUnit::Fahrenheit)? - 77.0).abs() < 1e-9);
//! assert!(temperature.changed().take());
//! # Ok::<(), horizon_physics::UnitError>(())
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use horizon_physics_core::logging::targets;
use horizon_physics_core::{ChangeFlag, Property, Signal};

use crate::error::{UnitError, UnitResult};
use crate::units::constants::{
    ABSOLUTE_ZERO_K, HUMIDITY_RELATIVE_DEFAULT, PRESSURE_REFERENCE_PA, ROOM_TEMPERATURE_K,
};
use crate::units::{
    AngleUnit, DimensionKind, DistanceUnit, HumidityUnit, PressureUnit, TemperatureUnit, Unit,
    UnitKind, WeightUnit,
};

/// A physical dimension with a canonical unit, a default and a valid range.
pub trait Dimension: Send + Sync + 'static {
    /// The unit enum of this dimension.
    type Unit: UnitKind;

    /// Documented default value, in the canonical unit.
    const DEFAULT_CANONICAL: f64;

    /// Which dimension this is.
    fn kind() -> DimensionKind {
        <Self::Unit as UnitKind>::DIMENSION
    }

    /// Check a canonical value. The default accepts any finite number.
    fn validate(canonical: f64) -> UnitResult<()> {
        if canonical.is_finite() {
            Ok(())
        } else {
            Err(UnitError::invalid_value(Self::kind(), canonical, "value must be finite"))
        }
    }
}

/// Thermodynamic temperature, stored in kelvin. Defaults to room temperature.
#[derive(Debug, Clone, Copy)]
pub struct Temperature;

impl Dimension for Temperature {
    type Unit = TemperatureUnit;
    const DEFAULT_CANONICAL: f64 = ROOM_TEMPERATURE_K;

    fn validate(canonical: f64) -> UnitResult<()> {
        if !canonical.is_finite() {
            return Err(UnitError::invalid_value(Self::kind(), canonical, "value must be finite"));
        }
        if canonical < ABSOLUTE_ZERO_K {
            return Err(UnitError::invalid_value(
                Self::kind(),
                canonical,
                "below absolute zero",
            ));
        }
        Ok(())
    }
}

/// Pressure, stored in pascals. Defaults to one standard atmosphere.
#[derive(Debug, Clone, Copy)]
pub struct Pressure;

impl Dimension for Pressure {
    type Unit = PressureUnit;
    const DEFAULT_CANONICAL: f64 = PRESSURE_REFERENCE_PA;

    fn validate(canonical: f64) -> UnitResult<()> {
        if !canonical.is_finite() {
            return Err(UnitError::invalid_value(Self::kind(), canonical, "value must be finite"));
        }
        if canonical < 0.0 {
            return Err(UnitError::invalid_value(
                Self::kind(),
                canonical,
                "absolute pressure cannot be negative",
            ));
        }
        Ok(())
    }
}

/// Relative humidity, stored in percent. Defaults to 50 %.
#[derive(Debug, Clone, Copy)]
pub struct Humidity;

impl Dimension for Humidity {
    type Unit = HumidityUnit;
    const DEFAULT_CANONICAL: f64 = HUMIDITY_RELATIVE_DEFAULT;

    fn validate(canonical: f64) -> UnitResult<()> {
        if (0.0..=100.0).contains(&canonical) {
            Ok(())
        } else {
            Err(UnitError::invalid_value(
                Self::kind(),
                canonical,
                "relative humidity must be within 0..=100 %",
            ))
        }
    }
}

/// Length, stored in meters. Defaults to zero.
#[derive(Debug, Clone, Copy)]
pub struct Distance;

impl Dimension for Distance {
    type Unit = DistanceUnit;
    const DEFAULT_CANONICAL: f64 = 0.0;
}

/// Plane angle, stored in radians. Defaults to zero.
#[derive(Debug, Clone, Copy)]
pub struct Angle;

impl Dimension for Angle {
    type Unit = AngleUnit;
    const DEFAULT_CANONICAL: f64 = 0.0;
}

/// Mass, stored in kilograms. Defaults to zero.
#[derive(Debug, Clone, Copy)]
pub struct Weight;

impl Dimension for Weight {
    type Unit = WeightUnit;
    const DEFAULT_CANONICAL: f64 = 0.0;

    fn validate(canonical: f64) -> UnitResult<()> {
        if canonical.is_finite() && canonical >= 0.0 {
            Ok(())
        } else {
            Err(UnitError::invalid_value(
                Self::kind(),
                canonical,
                "weight must be finite and non-negative",
            ))
        }
    }
}

/// An observable quantity of dimension `D`.
///
/// # Signals
///
/// - [`value_changed`](Self::value_changed): emitted with the new canonical
///   value after every mutation that changes it.
/// - [`unit_changed`](Self::unit_changed): emitted with the new display unit.
/// - [`changed`](Self::changed): edge-triggered flag marked by both.
pub struct UnitQuantity<D: Dimension> {
    canonical: Property<f64>,
    display_unit: Property<D::Unit>,
    value_changed: Signal<f64>,
    unit_changed: Signal<D::Unit>,
    changed: Arc<ChangeFlag>,
    _dimension: PhantomData<D>,
}

impl<D: Dimension> UnitQuantity<D> {
    /// Create a quantity holding the dimension's documented default.
    pub fn new() -> Self {
        Self::from_canonical_unchecked(D::DEFAULT_CANONICAL)
    }

    /// Create a quantity from a canonical value, rejecting invalid values.
    pub fn try_new(canonical: f64) -> UnitResult<Self> {
        D::validate(canonical)?;
        Ok(Self::from_canonical_unchecked(canonical))
    }

    /// Create a quantity from a value in `unit`.
    pub fn try_with_value(value: f64, unit: D::Unit) -> UnitResult<Self> {
        Self::try_new(D::Unit::table().to_canonical(value, unit)?)
    }

    fn from_canonical_unchecked(canonical: f64) -> Self {
        let changed = Arc::new(ChangeFlag::new());
        let quantity = Self {
            canonical: Property::new(canonical),
            display_unit: Property::new(D::Unit::default()),
            value_changed: Signal::new(),
            unit_changed: Signal::new(),
            changed,
            _dimension: PhantomData,
        };
        quantity.changed.track(&quantity.value_changed);
        quantity.changed.track(&quantity.unit_changed);
        quantity
    }

    /// The stored value in the canonical unit.
    pub fn canonical(&self) -> f64 {
        self.canonical.get()
    }

    /// Replace the canonical value, returning `true` if it changed.
    ///
    /// Invalid values are logged and ignored.
    pub fn set_canonical(&self, canonical: f64) -> bool {
        match self.try_set_canonical(canonical) {
            Ok(changed) => changed,
            Err(err) => {
                tracing::warn!(target: targets::QUANTITY, error = %err, "ignoring invalid write");
                false
            }
        }
    }

    /// Replace the canonical value, returning an error for invalid values.
    pub fn try_set_canonical(&self, canonical: f64) -> UnitResult<bool> {
        D::validate(canonical)?;
        if self.canonical.set(canonical) {
            tracing::trace!(
                target: targets::QUANTITY,
                dimension = %D::kind(),
                canonical,
                "quantity changed"
            );
            self.value_changed.emit(canonical);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Read the value converted into `unit`.
    pub fn get(&self, unit: D::Unit) -> UnitResult<f64> {
        D::Unit::table().from_canonical(self.canonical(), unit)
    }

    /// Read the value in a dimension-erased unit.
    ///
    /// Fails with [`UnitError::DimensionMismatch`] if `unit` measures another
    /// dimension.
    pub fn get_dyn(&self, unit: Unit) -> UnitResult<f64> {
        self.get(Self::unit_of(unit)?)
    }

    /// Write `value` expressed in `unit`, returning `true` if the stored value
    /// changed.
    ///
    /// An unsupported unit or an invalid value is logged at `warn` and the
    /// previous value is kept. Use [`try_set`](Self::try_set) to observe the
    /// error instead.
    pub fn set(&self, value: f64, unit: D::Unit) -> bool {
        match self.try_set(value, unit) {
            Ok(changed) => changed,
            Err(err) => {
                tracing::warn!(
                    target: targets::QUANTITY,
                    error = %err,
                    value,
                    unit = %unit,
                    "ignoring write in unsupported unit or out of range"
                );
                false
            }
        }
    }

    /// Write `value` expressed in `unit`, surfacing unsupported units and
    /// invalid values as errors.
    pub fn try_set(&self, value: f64, unit: D::Unit) -> UnitResult<bool> {
        let canonical = D::Unit::table().to_canonical(value, unit)?;
        self.try_set_canonical(canonical)
    }

    /// Write `value` in a dimension-erased unit.
    pub fn try_set_dyn(&self, value: f64, unit: Unit) -> UnitResult<bool> {
        self.try_set(value, Self::unit_of(unit)?)
    }

    /// The unit a view currently presents this quantity in.
    pub fn display_unit(&self) -> D::Unit {
        self.display_unit.get()
    }

    /// Change the display unit. The stored value is not touched.
    pub fn set_display_unit(&self, unit: D::Unit) -> bool {
        if self.display_unit.set(unit) {
            self.unit_changed.emit(unit);
            true
        } else {
            false
        }
    }

    /// Read the value in the current display unit.
    pub fn get_display(&self) -> UnitResult<f64> {
        self.get(self.display_unit())
    }

    /// Write a value expressed in the current display unit.
    pub fn set_display(&self, value: f64) -> bool {
        self.set(value, self.display_unit())
    }

    /// Restore the documented default value. The display unit is kept.
    pub fn reset(&self) -> bool {
        self.set_canonical(D::DEFAULT_CANONICAL)
    }

    /// Emitted with the new canonical value after each change.
    pub fn value_changed(&self) -> &Signal<f64> {
        &self.value_changed
    }

    /// Emitted with the new display unit after each change.
    pub fn unit_changed(&self) -> &Signal<D::Unit> {
        &self.unit_changed
    }

    /// Edge-triggered flag set by every value or display-unit change.
    pub fn changed(&self) -> &ChangeFlag {
        &self.changed
    }

    fn unit_of(unit: Unit) -> UnitResult<D::Unit> {
        D::Unit::from_unit(unit).ok_or_else(|| UnitError::DimensionMismatch {
            expected: D::kind(),
            found: unit.dimension(),
            unit: unit.canonical_str().to_string(),
        })
    }
}

impl<D: Dimension> Default for UnitQuantity<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Dimension> Clone for UnitQuantity<D> {
    /// Deep copy: the value and display unit are copied, signals and the
    /// change flag start fresh with no subscribers.
    fn clone(&self) -> Self {
        let copy = Self::from_canonical_unchecked(self.canonical());
        copy.display_unit.set_silent(self.display_unit());
        copy
    }
}

impl<D: Dimension> PartialEq for UnitQuantity<D> {
    /// Quantities are equal when their canonical values are; the display
    /// unit is presentation state and does not participate.
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl<D: Dimension> fmt::Debug for UnitQuantity<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitQuantity")
            .field("dimension", &D::kind())
            .field("canonical", &self.canonical())
            .field("display_unit", &self.display_unit())
            .finish()
    }
}

static_assertions::assert_impl_all!(UnitQuantity<Temperature>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_defaults() {
        assert_eq!(UnitQuantity::<Temperature>::new().canonical(), 293.15);
        assert_eq!(UnitQuantity::<Pressure>::new().canonical(), 101_325.0);
        assert_eq!(UnitQuantity::<Humidity>::new().canonical(), 50.0);
        assert_eq!(UnitQuantity::<Distance>::new().canonical(), 0.0);
    }

    #[test]
    fn test_set_then_get_same_unit() {
        let pressure = UnitQuantity::<Pressure>::new();
        for &unit in PressureUnit::ALL {
            assert!(pressure.try_set(2.5, unit).is_ok());
            assert!((pressure.get(unit).unwrap() - 2.5).abs() < EPS);
        }
    }

    #[test]
    fn test_set_marks_changed_and_emits() {
        let temperature = UnitQuantity::<Temperature>::new();
        let emitted = Arc::new(parking_lot::Mutex::new(Vec::new()));

        let emitted_clone = emitted.clone();
        temperature.value_changed().connect(move |&k| emitted_clone.lock().push(k));

        assert!(temperature.set(0.0, TemperatureUnit::Celsius));
        assert!(temperature.changed().take());
        assert!(!temperature.changed().take());
        assert_eq!(*emitted.lock(), vec![273.15]);

        // Same value again: no change, no emission.
        assert!(!temperature.set(273.15, TemperatureUnit::Kelvin));
        assert!(!temperature.changed().is_set());
        assert_eq!(emitted.lock().len(), 1);
    }

    #[test]
    fn test_unsupported_unit_getter_fails() {
        let humidity = UnitQuantity::<Humidity>::new();
        assert!(matches!(
            humidity.get(HumidityUnit::Molar),
            Err(UnitError::UnsupportedUnit { dimension: DimensionKind::Humidity, .. })
        ));
    }

    #[test]
    fn test_unsupported_unit_setter_is_ignored() {
        let humidity = UnitQuantity::<Humidity>::new();
        assert!(!humidity.set(0.01, HumidityUnit::Molar));
        assert_eq!(humidity.canonical(), 50.0);
        assert!(!humidity.changed().is_set());
        assert!(humidity.try_set(0.01, HumidityUnit::Molar).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temperature = UnitQuantity::<Temperature>::new();
        assert!(!temperature.set(-300.0, TemperatureUnit::Celsius));
        assert_eq!(temperature.canonical(), 293.15);
        assert!(matches!(
            temperature.try_set(-1.0, TemperatureUnit::Kelvin),
            Err(UnitError::InvalidValue { .. })
        ));
        assert!(UnitQuantity::<Temperature>::try_new(f64::NAN).is_err());
        assert!(UnitQuantity::<Humidity>::try_new(101.0).is_err());
        assert!(UnitQuantity::<Pressure>::try_new(-1.0).is_err());
        assert!(UnitQuantity::<Weight>::try_new(-1.0).is_err());
    }

    #[test]
    fn test_display_unit_independent_of_value() {
        let temperature = UnitQuantity::<Temperature>::new();
        assert_eq!(temperature.display_unit(), TemperatureUnit::Celsius);

        assert!(temperature.set_display_unit(TemperatureUnit::Fahrenheit));
        assert_eq!(temperature.canonical(), 293.15);
        assert!((temperature.get_display().unwrap() - 68.0).abs() < EPS);

        temperature.set_display(32.0);
        assert!((temperature.canonical() - 273.15).abs() < EPS);
    }

    #[test]
    fn test_display_unit_change_notifies() {
        let distance = UnitQuantity::<Distance>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        distance.unit_changed().connect(move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(distance.set_display_unit(DistanceUnit::Feet));
        assert!(!distance.set_display_unit(DistanceUnit::Feet));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(distance.changed().take());
    }

    #[test]
    fn test_get_dyn_checks_dimension() {
        let pressure = UnitQuantity::<Pressure>::new();
        let atm = pressure.get_dyn(Unit::Pressure(PressureUnit::Atmospheres)).unwrap();
        assert!((atm - 1.0).abs() < EPS);

        let err = pressure
            .get_dyn(Unit::Temperature(TemperatureUnit::Kelvin))
            .unwrap_err();
        assert!(matches!(
            err,
            UnitError::DimensionMismatch {
                expected: DimensionKind::Pressure,
                found: DimensionKind::Temperature,
                ..
            }
        ));
        assert!(pressure.try_set_dyn(1.0, Unit::Angle(AngleUnit::Degrees)).is_err());
    }

    #[test]
    fn test_reset_restores_default() {
        let pressure = UnitQuantity::<Pressure>::new();
        pressure.set(50.0, PressureUnit::Kilopascals);
        assert!(pressure.reset());
        assert_eq!(pressure.canonical(), 101_325.0);
        assert!(!pressure.reset());
    }

    #[test]
    fn test_clone_is_deep() {
        let original = UnitQuantity::<Angle>::new();
        original.set_display_unit(AngleUnit::Radians);
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        original.value_changed().connect(move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        let copy = original.clone();
        assert_eq!(copy, original);
        assert_eq!(copy.display_unit(), AngleUnit::Radians);
        assert_eq!(copy.value_changed().connection_count(), 0);

        copy.set(90.0, AngleUnit::Degrees);
        assert_eq!(original.canonical(), 0.0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_ne!(copy, original);
    }
}
