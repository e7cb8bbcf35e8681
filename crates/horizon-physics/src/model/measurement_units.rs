//! The display-unit registry.

use std::fmt;
use std::sync::Arc;

use horizon_physics_core::logging::targets;
use horizon_physics_core::{ChangeFlag, Property, Signal};
use serde::{Deserialize, Serialize};

use super::CompositeSettings;
use crate::error::UnitResult;
use crate::units::{AngleUnit, DistanceUnit, PressureUnit, TemperatureUnit, UnitKind, WeightUnit};

/// Plain snapshot of the selected unit per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementUnitsValues {
    pub distance: DistanceUnit,
    pub angle: AngleUnit,
    pub weight: WeightUnit,
    pub temperature: TemperatureUnit,
    pub pressure: PressureUnit,
}

impl MeasurementUnitsValues {
    /// Meters, radians, kilograms, kelvin and pascals.
    pub const MKS: Self = Self {
        distance: DistanceUnit::Meters,
        angle: AngleUnit::Radians,
        weight: WeightUnit::Kilograms,
        temperature: TemperatureUnit::Kelvin,
        pressure: PressureUnit::Pascals,
    };
}

/// One dimension's selection: current unit, fixed default, change plumbing.
struct UnitSelection<U: UnitKind> {
    current: Property<U>,
    default: U,
    unit_changed: Signal<U>,
    changed: Arc<ChangeFlag>,
}

impl<U: UnitKind> UnitSelection<U> {
    fn new(current: U, default: U) -> Self {
        let selection = Self {
            current: Property::new(current),
            default,
            unit_changed: Signal::new(),
            changed: Arc::new(ChangeFlag::new()),
        };
        selection.changed.track(&selection.unit_changed);
        selection
    }

    fn get(&self) -> U {
        self.current.get()
    }

    fn set(&self, unit: U) -> bool {
        if self.current.set(unit) {
            tracing::trace!(target: targets::MODEL, dimension = %U::DIMENSION, %unit, "unit selected");
            self.unit_changed.emit(unit);
            true
        } else {
            false
        }
    }
}

/// The display unit chosen for each physical dimension.
///
/// Each dimension has a current unit and a default fixed at construction.
/// Changes are reported twice: through a per-dimension edge-triggered flag
/// (`is_distance_unit_changed()` and friends) and through the aggregate
/// [`changed`](Self::changed) flag. Bulk updates publish one aggregate
/// notification.
///
/// ```
/// use horizon_physics::{DistanceUnit, MeasurementUnits};
///
/// let units = MeasurementUnits::new();
/// units.set_distance_unit(DistanceUnit::Feet);
/// assert!(units.is_distance_unit_changed());
/// assert!(!units.is_distance_unit_changed());
/// assert!(!units.is_angle_unit_changed());
///
/// units.reset();
/// assert_eq!(units.distance_unit(), DistanceUnit::Meters);
/// ```
pub struct MeasurementUnits {
    distance: UnitSelection<DistanceUnit>,
    angle: UnitSelection<AngleUnit>,
    weight: UnitSelection<WeightUnit>,
    temperature: UnitSelection<TemperatureUnit>,
    pressure: UnitSelection<PressureUnit>,
    changed: Arc<ChangeFlag>,
}

impl MeasurementUnits {
    /// Each dimension's default unit.
    pub fn new() -> Self {
        Self::with_units(MeasurementUnitsValues::default())
    }

    /// Start from `units`, which also become the defaults for [`reset`](Self::reset).
    pub fn with_units(units: MeasurementUnitsValues) -> Self {
        Self::assemble(units, units)
    }

    /// The MKS preset.
    pub fn mks() -> Self {
        Self::with_units(MeasurementUnitsValues::MKS)
    }

    fn assemble(current: MeasurementUnitsValues, defaults: MeasurementUnitsValues) -> Self {
        let units = Self {
            distance: UnitSelection::new(current.distance, defaults.distance),
            angle: UnitSelection::new(current.angle, defaults.angle),
            weight: UnitSelection::new(current.weight, defaults.weight),
            temperature: UnitSelection::new(current.temperature, defaults.temperature),
            pressure: UnitSelection::new(current.pressure, defaults.pressure),
            changed: Arc::new(ChangeFlag::new()),
        };
        units.changed.track(&units.distance.unit_changed);
        units.changed.track(&units.angle.unit_changed);
        units.changed.track(&units.weight.unit_changed);
        units.changed.track(&units.temperature.unit_changed);
        units.changed.track(&units.pressure.unit_changed);
        units
    }

    pub fn distance_unit(&self) -> DistanceUnit {
        self.distance.get()
    }

    pub fn set_distance_unit(&self, unit: DistanceUnit) -> bool {
        self.distance.set(unit)
    }

    pub fn angle_unit(&self) -> AngleUnit {
        self.angle.get()
    }

    pub fn set_angle_unit(&self, unit: AngleUnit) -> bool {
        self.angle.set(unit)
    }

    pub fn weight_unit(&self) -> WeightUnit {
        self.weight.get()
    }

    pub fn set_weight_unit(&self, unit: WeightUnit) -> bool {
        self.weight.set(unit)
    }

    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.temperature.get()
    }

    pub fn set_temperature_unit(&self, unit: TemperatureUnit) -> bool {
        self.temperature.set(unit)
    }

    pub fn pressure_unit(&self) -> PressureUnit {
        self.pressure.get()
    }

    pub fn set_pressure_unit(&self, unit: PressureUnit) -> bool {
        self.pressure.set(unit)
    }

    /// Edge-triggered: `true` once per distance unit change.
    pub fn is_distance_unit_changed(&self) -> bool {
        self.distance.changed.take()
    }

    /// Edge-triggered: `true` once per angle unit change.
    pub fn is_angle_unit_changed(&self) -> bool {
        self.angle.changed.take()
    }

    /// Edge-triggered: `true` once per weight unit change.
    pub fn is_weight_unit_changed(&self) -> bool {
        self.weight.changed.take()
    }

    /// Edge-triggered: `true` once per temperature unit change.
    pub fn is_temperature_unit_changed(&self) -> bool {
        self.temperature.changed.take()
    }

    /// Edge-triggered: `true` once per pressure unit change.
    pub fn is_pressure_unit_changed(&self) -> bool {
        self.pressure.changed.take()
    }

    /// Emitted with the new unit when the distance unit changes.
    pub fn distance_unit_changed(&self) -> &Signal<DistanceUnit> {
        &self.distance.unit_changed
    }

    /// Emitted with the new unit when the angle unit changes.
    pub fn angle_unit_changed(&self) -> &Signal<AngleUnit> {
        &self.angle.unit_changed
    }

    /// Emitted with the new unit when the weight unit changes.
    pub fn weight_unit_changed(&self) -> &Signal<WeightUnit> {
        &self.weight.unit_changed
    }

    /// Emitted with the new unit when the temperature unit changes.
    pub fn temperature_unit_changed(&self) -> &Signal<TemperatureUnit> {
        &self.temperature.unit_changed
    }

    /// Emitted with the new unit when the pressure unit changes.
    pub fn pressure_unit_changed(&self) -> &Signal<PressureUnit> {
        &self.pressure.unit_changed
    }

    /// Select all five units as one batch.
    ///
    /// Each `*_unit_changed` signal fires as its unit is stored, so its slots
    /// may see the remaining units still at their old values.
    /// [`changed`](Self::changed) publishes once, after all five are set.
    pub fn set_measurement_units(&self, units: &MeasurementUnitsValues) {
        let batch = self.changed.batch();
        batch.touch();
        self.distance.set(units.distance);
        self.angle.set(units.angle);
        self.weight.set(units.weight);
        self.temperature.set(units.temperature);
        self.pressure.set(units.pressure);
        tracing::debug!(target: targets::MODEL, ?units, "measurement units applied");
    }

    /// Copy the current units of `other` as one batch. Defaults are kept.
    pub fn assign_from(&self, other: &MeasurementUnits) {
        self.set_measurement_units(&other.values());
    }

    /// Restore the construction-time defaults as one batch.
    pub fn reset(&self) {
        self.set_measurement_units(&self.defaults());
    }

    /// The construction-time defaults.
    pub fn defaults(&self) -> MeasurementUnitsValues {
        MeasurementUnitsValues {
            distance: self.distance.default,
            angle: self.angle.default,
            weight: self.weight.default,
            temperature: self.temperature.default,
            pressure: self.pressure.default,
        }
    }

    /// Snapshot the current units.
    pub fn values(&self) -> MeasurementUnitsValues {
        MeasurementUnitsValues {
            distance: self.distance_unit(),
            angle: self.angle_unit(),
            weight: self.weight_unit(),
            temperature: self.temperature_unit(),
            pressure: self.pressure_unit(),
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

impl CompositeSettings for MeasurementUnits {
    type Values = MeasurementUnitsValues;

    fn values(&self) -> Self::Values {
        MeasurementUnits::values(self)
    }

    fn defaults(&self) -> Self::Values {
        MeasurementUnits::defaults(self)
    }

    fn set_all(&self, values: &Self::Values) -> UnitResult<()> {
        self.set_measurement_units(values);
        Ok(())
    }

    fn changed(&self) -> &ChangeFlag {
        &self.changed
    }
}

impl Default for MeasurementUnits {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MeasurementUnits {
    fn clone(&self) -> Self {
        Self::assemble(self.values(), self.defaults())
    }
}

impl PartialEq for MeasurementUnits {
    /// Compares the current units only.
    fn eq(&self, other: &Self) -> bool {
        self.values() == other.values()
    }
}

impl Eq for MeasurementUnits {}

impl fmt::Debug for MeasurementUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasurementUnits")
            .field("current", &self.values())
            .field("defaults", &self.defaults())
            .finish()
    }
}

static_assertions::assert_impl_all!(MeasurementUnits: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_unit_kinds() {
        let units = MeasurementUnits::new();
        assert_eq!(units.distance_unit(), DistanceUnit::Meters);
        assert_eq!(units.angle_unit(), AngleUnit::Degrees);
        assert_eq!(units.weight_unit(), WeightUnit::Kilograms);
        assert_eq!(units.temperature_unit(), TemperatureUnit::Celsius);
        assert_eq!(units.pressure_unit(), PressureUnit::Pascals);
    }

    #[test]
    fn test_mks_preset() {
        let units = MeasurementUnits::mks();
        assert_eq!(units.values(), MeasurementUnitsValues::MKS);
        assert_eq!(units.defaults(), MeasurementUnitsValues::MKS);
    }

    #[test]
    fn test_per_dimension_flags_are_independent() {
        let units = MeasurementUnits::new();
        assert!(units.set_pressure_unit(PressureUnit::Millibars));
        assert!(!units.set_pressure_unit(PressureUnit::Millibars));

        assert!(!units.is_distance_unit_changed());
        assert!(units.is_pressure_unit_changed());
        assert!(!units.is_pressure_unit_changed());
        assert!(units.is_changed());
    }

    #[test]
    fn test_batch_publishes_once_and_marks_each_dimension() {
        let units = MeasurementUnits::new();
        units.set_measurement_units(&MeasurementUnitsValues {
            distance: DistanceUnit::Feet,
            angle: AngleUnit::Radians,
            weight: WeightUnit::Pounds,
            temperature: TemperatureUnit::Fahrenheit,
            pressure: PressureUnit::Atmospheres,
        });

        assert_eq!(units.changed().notify_count(), 1);
        assert!(units.is_distance_unit_changed());
        assert!(units.is_angle_unit_changed());
        assert!(units.is_weight_unit_changed());
        assert!(units.is_temperature_unit_changed());
        assert!(units.is_pressure_unit_changed());
    }

    #[test]
    fn test_reset_restores_construction_defaults() {
        let units = MeasurementUnits::with_units(MeasurementUnitsValues {
            distance: DistanceUnit::Yards,
            ..MeasurementUnitsValues::default()
        });
        units.set_distance_unit(DistanceUnit::Miles);
        assert!(units.is_changed());
        units.reset();
        assert_eq!(units.distance_unit(), DistanceUnit::Yards);
        assert!(units.is_changed());

        let snapshot = units.values();
        units.reset();
        assert_eq!(units.values(), snapshot);
        assert_eq!(units.changed().notify_count(), 3);
    }

    #[test]
    fn test_clone_keeps_defaults_and_is_independent() {
        let original = MeasurementUnits::mks();
        original.set_temperature_unit(TemperatureUnit::Celsius);

        let copy = original.clone();
        assert_eq!(copy, original);
        assert_eq!(copy.defaults(), MeasurementUnitsValues::MKS);
        assert!(!copy.changed().is_set());

        copy.set_angle_unit(AngleUnit::Degrees);
        assert_eq!(original.angle_unit(), AngleUnit::Radians);
        assert_ne!(copy, original);

        original.assign_from(&copy);
        assert_eq!(original.angle_unit(), AngleUnit::Degrees);
        assert_eq!(original.defaults(), MeasurementUnitsValues::MKS);
    }
}
