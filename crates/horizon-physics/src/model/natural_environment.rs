//! Ambient conditions for acoustic and atmospheric calculations.

use std::fmt;
use std::sync::Arc;

use horizon_physics_core::logging::targets;
use horizon_physics_core::{ChangeFlag, Property, Signal};
use serde::{Deserialize, Serialize};

use super::CompositeSettings;
use crate::error::{UnitError, UnitResult};
use crate::quantity::{Dimension, Humidity, Pressure, Temperature, UnitQuantity};
use crate::units::constants::{
    HUMIDITY_RELATIVE_DEFAULT, PRESSURE_REFERENCE_PA, ROOM_TEMPERATURE_K,
};
use crate::units::{HumidityUnit, PressureUnit, TemperatureUnit};

/// Plain snapshot of a [`NaturalEnvironment`], in canonical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaturalEnvironmentValues {
    /// Temperature in kelvin.
    pub temperature_k: f64,
    /// Relative humidity in percent.
    pub humidity_relative: f64,
    /// Pressure in pascals.
    pub pressure_pa: f64,
    /// Whether air attenuation is applied.
    pub air_attenuation_applied: bool,
}

impl NaturalEnvironmentValues {
    /// Room temperature, 50 % humidity, one atmosphere, attenuation on.
    pub const DEFAULT: Self = Self {
        temperature_k: ROOM_TEMPERATURE_K,
        humidity_relative: HUMIDITY_RELATIVE_DEFAULT,
        pressure_pa: PRESSURE_REFERENCE_PA,
        air_attenuation_applied: true,
    };

    /// Check every field, reporting all problems at once as
    /// [`UnitError::InvalidFieldCombination`].
    pub fn validate(&self) -> UnitResult<()> {
        let problems: Vec<String> = [
            Temperature::validate(self.temperature_k).err(),
            Humidity::validate(self.humidity_relative).err(),
            Pressure::validate(self.pressure_pa).err(),
        ]
        .into_iter()
        .flatten()
        .map(|err| err.to_string())
        .collect();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(UnitError::InvalidFieldCombination(problems.join("; ")))
        }
    }
}

impl Default for NaturalEnvironmentValues {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Observable ambient conditions.
///
/// Every field mutation marks the aggregate [`changed`](Self::changed) flag;
/// [`set_natural_environment`](Self::set_natural_environment) and
/// [`reset`](Self::reset) publish one cycle for the whole update.
///
/// # Example
///
/// ```
/// use horizon_physics::{NaturalEnvironment, PressureUnit, TemperatureUnit};
///
/// let env = NaturalEnvironment::new();
/// assert!((env.temperature(TemperatureUnit::Celsius)? - 20.0).abs() < 0.01);
/// assert!((env.pressure(PressureUnit::Atmospheres)? - 1.0).abs() < 0.001);
///
/// env.set_temperature(30.0, TemperatureUnit::Celsius);
/// assert!(env.is_changed());
/// assert!(!env.is_changed());
/// # Ok::<(), horizon_physics::UnitError>(())
/// ```
pub struct NaturalEnvironment {
    temperature: UnitQuantity<Temperature>,
    humidity: UnitQuantity<Humidity>,
    pressure: UnitQuantity<Pressure>,
    air_attenuation_applied: Property<bool>,
    air_attenuation_changed: Signal<bool>,
    changed: Arc<ChangeFlag>,
}

impl NaturalEnvironment {
    /// Create an environment holding the documented defaults.
    pub fn new() -> Self {
        Self::assemble(
            UnitQuantity::new(),
            UnitQuantity::new(),
            UnitQuantity::new(),
            NaturalEnvironmentValues::DEFAULT.air_attenuation_applied,
        )
    }

    /// Create an environment from `values`.
    ///
    /// A field whose value is out of range is logged and left at its default.
    pub fn with_values(values: NaturalEnvironmentValues) -> Self {
        Self::assemble(
            quantity_or_default(values.temperature_k),
            quantity_or_default(values.humidity_relative),
            quantity_or_default(values.pressure_pa),
            values.air_attenuation_applied,
        )
    }

    /// Create an environment from `values`, rejecting out-of-range fields.
    pub fn try_with_values(values: NaturalEnvironmentValues) -> UnitResult<Self> {
        values.validate()?;
        Ok(Self::with_values(values))
    }

    fn assemble(
        temperature: UnitQuantity<Temperature>,
        humidity: UnitQuantity<Humidity>,
        pressure: UnitQuantity<Pressure>,
        air_attenuation_applied: bool,
    ) -> Self {
        let env = Self {
            temperature,
            humidity,
            pressure,
            air_attenuation_applied: Property::new(air_attenuation_applied),
            air_attenuation_changed: Signal::new(),
            changed: Arc::new(ChangeFlag::new()),
        };
        env.changed.track(env.temperature.value_changed());
        env.changed.track(env.humidity.value_changed());
        env.changed.track(env.pressure.value_changed());
        env.changed.track(&env.air_attenuation_changed);
        env
    }

    // -------------------------------------------------------------------------
    // Temperature
    // -------------------------------------------------------------------------

    /// Temperature in `unit`.
    pub fn temperature(&self, unit: TemperatureUnit) -> UnitResult<f64> {
        self.temperature.get(unit)
    }

    /// Temperature in kelvin.
    pub fn temperature_k(&self) -> f64 {
        self.temperature.canonical()
    }

    /// Set the temperature from a value in `unit`. Invalid writes are logged
    /// and ignored.
    pub fn set_temperature(&self, value: f64, unit: TemperatureUnit) -> bool {
        self.temperature.set(value, unit)
    }

    /// Set the temperature, surfacing invalid writes.
    pub fn try_set_temperature(&self, value: f64, unit: TemperatureUnit) -> UnitResult<bool> {
        self.temperature.try_set(value, unit)
    }

    /// The underlying temperature quantity, for display-unit control and
    /// per-field subscriptions.
    pub fn temperature_quantity(&self) -> &UnitQuantity<Temperature> {
        &self.temperature
    }

    // -------------------------------------------------------------------------
    // Humidity
    // -------------------------------------------------------------------------

    /// Relative humidity in percent.
    pub fn humidity_relative(&self) -> f64 {
        self.humidity.canonical()
    }

    /// Set the relative humidity in percent.
    pub fn set_humidity_relative(&self, percent: f64) -> bool {
        self.humidity.set(percent, HumidityUnit::Relative)
    }

    /// Set the humidity from a value in `unit`. Only relative humidity is
    /// supported; other units are logged and ignored.
    pub fn set_humidity(&self, value: f64, unit: HumidityUnit) -> bool {
        self.humidity.set(value, unit)
    }

    /// The underlying humidity quantity.
    pub fn humidity_quantity(&self) -> &UnitQuantity<Humidity> {
        &self.humidity
    }

    // -------------------------------------------------------------------------
    // Pressure
    // -------------------------------------------------------------------------

    /// Pressure in `unit`.
    pub fn pressure(&self, unit: PressureUnit) -> UnitResult<f64> {
        self.pressure.get(unit)
    }

    /// Pressure in pascals.
    pub fn pressure_pa(&self) -> f64 {
        self.pressure.canonical()
    }

    /// Set the pressure from a value in `unit`. Invalid writes are logged and
    /// ignored.
    pub fn set_pressure(&self, value: f64, unit: PressureUnit) -> bool {
        self.pressure.set(value, unit)
    }

    /// Set the pressure, surfacing invalid writes.
    pub fn try_set_pressure(&self, value: f64, unit: PressureUnit) -> UnitResult<bool> {
        self.pressure.try_set(value, unit)
    }

    /// The underlying pressure quantity.
    pub fn pressure_quantity(&self) -> &UnitQuantity<Pressure> {
        &self.pressure
    }

    // -------------------------------------------------------------------------
    // Air attenuation
    // -------------------------------------------------------------------------

    /// Whether air attenuation is applied.
    pub fn is_air_attenuation_applied(&self) -> bool {
        self.air_attenuation_applied.get()
    }

    /// Switch air attenuation on or off.
    pub fn set_air_attenuation_applied(&self, applied: bool) -> bool {
        if self.air_attenuation_applied.set(applied) {
            self.air_attenuation_changed.emit(applied);
            true
        } else {
            false
        }
    }

    /// Emitted with the new setting when air attenuation is toggled.
    pub fn air_attenuation_changed(&self) -> &Signal<bool> {
        &self.air_attenuation_changed
    }

    // -------------------------------------------------------------------------
    // Whole-model operations
    // -------------------------------------------------------------------------

    /// Apply every field as one batch.
    ///
    /// The values are validated first; on error nothing is changed and no
    /// notification is published.
    /// The per-field `*_changed` signals still fire as each field is stored,
    /// so a slot on one of them may observe a partly applied update. Only
    /// [`changed`](Self::changed) waits for the whole batch.
    pub fn set_natural_environment(&self, values: &NaturalEnvironmentValues) -> UnitResult<()> {
        values.validate()?;

        let batch = self.changed.batch();
        batch.touch();
        self.temperature.set_canonical(values.temperature_k);
        self.humidity.set_canonical(values.humidity_relative);
        self.pressure.set_canonical(values.pressure_pa);
        self.set_air_attenuation_applied(values.air_attenuation_applied);
        tracing::debug!(target: targets::MODEL, ?values, "natural environment applied");
        Ok(())
    }

    /// Copy every field from `other` as one batch.
    pub fn assign_from(&self, other: &NaturalEnvironment) {
        if let Err(err) = self.set_natural_environment(&other.values()) {
            tracing::error!(target: targets::MODEL, error = %err, "failed to copy natural environment");
        }
    }

    /// Restore the documented defaults as one batch.
    pub fn reset(&self) {
        CompositeSettings::reset(self);
    }

    /// Snapshot the current values.
    pub fn values(&self) -> NaturalEnvironmentValues {
        NaturalEnvironmentValues {
            temperature_k: self.temperature_k(),
            humidity_relative: self.humidity_relative(),
            pressure_pa: self.pressure_pa(),
            air_attenuation_applied: self.is_air_attenuation_applied(),
        }
    }

    /// Edge-triggered read of the aggregate change flag.
    pub fn is_changed(&self) -> bool {
        self.changed.take()
    }

    /// The aggregate change flag.
    pub fn changed(&self) -> &ChangeFlag {
        &self.changed
    }
}

fn quantity_or_default<D: Dimension>(canonical: f64) -> UnitQuantity<D> {
    UnitQuantity::try_new(canonical).unwrap_or_else(|err| {
        tracing::warn!(target: targets::MODEL, error = %err, "using default for invalid field");
        UnitQuantity::new()
    })
}

impl CompositeSettings for NaturalEnvironment {
    type Values = NaturalEnvironmentValues;

    fn values(&self) -> Self::Values {
        NaturalEnvironment::values(self)
    }

    fn defaults(&self) -> Self::Values {
        NaturalEnvironmentValues::DEFAULT
    }

    fn set_all(&self, values: &Self::Values) -> UnitResult<()> {
        self.set_natural_environment(values)
    }

    fn changed(&self) -> &ChangeFlag {
        &self.changed
    }
}

impl Default for NaturalEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for NaturalEnvironment {
    fn clone(&self) -> Self {
        Self::assemble(
            self.temperature.clone(),
            self.humidity.clone(),
            self.pressure.clone(),
            self.is_air_attenuation_applied(),
        )
    }
}

impl PartialEq for NaturalEnvironment {
    fn eq(&self, other: &Self) -> bool {
        self.values() == other.values()
    }
}

impl fmt::Debug for NaturalEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaturalEnvironment")
            .field("temperature_k", &self.temperature_k())
            .field("humidity_relative", &self.humidity_relative())
            .field("pressure_pa", &self.pressure_pa())
            .field("air_attenuation_applied", &self.is_air_attenuation_applied())
            .finish()
    }
}

static_assertions::assert_impl_all!(NaturalEnvironment: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn count_invalidations(env: &NaturalEnvironment) -> Arc<AtomicUsize> {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        env.changed().invalidated().connect(move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });
        hits
    }

    #[test]
    fn test_defaults() {
        let env = NaturalEnvironment::new();
        assert_eq!(env.values(), NaturalEnvironmentValues::default());
        assert!(!env.changed().is_set());
    }

    #[test]
    fn test_field_mutations_mark_aggregate() {
        let env = NaturalEnvironment::new();
        let hits = count_invalidations(&env);

        env.set_temperature(50.0, TemperatureUnit::Fahrenheit);
        env.set_humidity_relative(30.0);
        env.set_pressure(100.0, PressureUnit::Kilopascals);
        env.set_air_attenuation_applied(false);

        // Nobody read the flag in between, so only the first change notifies.
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(env.is_changed());
        assert!(!env.is_changed());

        env.set_humidity_relative(40.0);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_reading_slot_sees_every_field_mutation() {
        let env = Arc::new(NaturalEnvironment::new());
        let refreshes = Arc::new(AtomicUsize::new(0));

        let weak = Arc::downgrade(&env);
        let refreshes_clone = refreshes.clone();
        env.changed().invalidated().connect(move |_| {
            if let Some(env) = weak.upgrade() {
                if env.is_changed() {
                    refreshes_clone.fetch_add(1, Ordering::SeqCst);
                }
            }
        });

        env.set_temperature(10.0, TemperatureUnit::Celsius);
        env.set_humidity_relative(30.0);
        env.set_air_attenuation_applied(false);
        assert_eq!(refreshes.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_set_natural_environment_notifies_once() {
        let env = NaturalEnvironment::new();
        let hits = count_invalidations(&env);

        env.set_natural_environment(&NaturalEnvironmentValues {
            temperature_k: 300.0,
            humidity_relative: 80.0,
            pressure_pa: 90_000.0,
            air_attenuation_applied: false,
        })
        .unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(env.temperature_k(), 300.0);
        assert!(!env.is_air_attenuation_applied());
    }

    #[test]
    fn test_field_slot_runs_before_batch_completes() {
        let env = Arc::new(NaturalEnvironment::new());
        let seen = Arc::new(parking_lot::Mutex::new(None));

        let weak = Arc::downgrade(&env);
        let seen_clone = seen.clone();
        env.temperature_quantity().value_changed().connect(move |_| {
            if let Some(env) = weak.upgrade() {
                *seen_clone.lock() = Some((env.humidity_relative(), env.changed().is_set()));
            }
        });

        env.set_natural_environment(&NaturalEnvironmentValues {
            temperature_k: 280.0,
            humidity_relative: 10.0,
            ..NaturalEnvironmentValues::DEFAULT
        })
        .unwrap();

        // Humidity was not stored yet and the aggregate flag had not published.
        assert_eq!(*seen.lock(), Some((HUMIDITY_RELATIVE_DEFAULT, false)));
        assert!(env.is_changed());
    }

    #[test]
    fn test_set_natural_environment_rejects_invalid_atomically() {
        let env = NaturalEnvironment::new();
        let err = env
            .set_natural_environment(&NaturalEnvironmentValues {
                temperature_k: -5.0,
                humidity_relative: 120.0,
                ..NaturalEnvironmentValues::DEFAULT
            })
            .unwrap_err();

        match err {
            UnitError::InvalidFieldCombination(message) => {
                assert!(message.contains("temperature"));
                assert!(message.contains("humidity"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(env.values(), NaturalEnvironmentValues::DEFAULT);
        assert_eq!(env.changed().notify_count(), 0);
    }

    #[test]
    fn test_try_with_values() {
        assert!(
            NaturalEnvironment::try_with_values(NaturalEnvironmentValues {
                pressure_pa: -1.0,
                ..NaturalEnvironmentValues::DEFAULT
            })
            .is_err()
        );

        let env = NaturalEnvironment::with_values(NaturalEnvironmentValues {
            pressure_pa: -1.0,
            humidity_relative: 10.0,
            ..NaturalEnvironmentValues::DEFAULT
        });
        assert_eq!(env.pressure_pa(), PRESSURE_REFERENCE_PA);
        assert_eq!(env.humidity_relative(), 10.0);
    }

    #[test]
    fn test_reset_on_defaults_still_reports_change() {
        let env = NaturalEnvironment::new();
        env.reset();
        assert!(env.is_changed());
        assert_eq!(env.values(), NaturalEnvironmentValues::DEFAULT);
    }

    #[test]
    fn test_molar_humidity_is_ignored() {
        let env = NaturalEnvironment::new();
        assert!(!env.set_humidity(0.5, HumidityUnit::Molar));
        assert_eq!(env.humidity_relative(), HUMIDITY_RELATIVE_DEFAULT);
        assert!(!env.changed().is_set());
    }

    #[test]
    fn test_clone_and_assign() {
        let original = NaturalEnvironment::new();
        let copy = original.clone();
        assert_eq!(copy, original);

        copy.set_temperature(0.0, TemperatureUnit::Celsius);
        assert_ne!(copy, original);
        assert!(!original.changed().is_set());

        original.assign_from(&copy);
        assert_eq!(copy, original);
        assert_eq!(original.changed().notify_count(), 1);
    }
}
