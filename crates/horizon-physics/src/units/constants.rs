//! Physical constants used for defaults and conversions.

/// Offset between the Celsius and Kelvin scales.
pub const CELSIUS_KELVIN_OFFSET: f64 = 273.15;

/// Absolute zero in kelvin.
pub const ABSOLUTE_ZERO_K: f64 = 0.0;

/// Room temperature (20 °C) in kelvin.
pub const ROOM_TEMPERATURE_K: f64 = 293.15;

/// Standard atmospheric pressure at sea level in pascals.
pub const PRESSURE_REFERENCE_PA: f64 = 101_325.0;

/// Default relative humidity in percent.
pub const HUMIDITY_RELATIVE_DEFAULT: f64 = 50.0;
