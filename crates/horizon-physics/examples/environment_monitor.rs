//! Watches a natural environment and prints it in the registry's units.
//!
//! Run with:
//!
//! ```text
//! cargo run -p horizon-physics --example environment_monitor
//! ```

use std::sync::Arc;

use horizon_physics::{
    MeasurementUnits, MeasurementUnitsValues, NaturalEnvironment, NaturalEnvironmentValues,
    PressureUnit, TemperatureUnit, UnitKind, UnitResult, physics_info, physics_warn,
};

fn report(env: &NaturalEnvironment, units: &MeasurementUnits) -> UnitResult<()> {
    let temperature_unit = units.temperature_unit();
    let pressure_unit = units.pressure_unit();
    println!(
        "  {:.2} {}, {:.1} % RH, {:.4} {}, attenuation {}",
        env.temperature(temperature_unit)?,
        temperature_unit.abbreviation(),
        env.humidity_relative(),
        env.pressure(pressure_unit)?,
        pressure_unit.abbreviation(),
        if env.is_air_attenuation_applied() { "on" } else { "off" },
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let env = Arc::new(NaturalEnvironment::new());
    let units = Arc::new(MeasurementUnits::new());

    // Refresh whenever either model publishes a change. Reading both flags
    // re-arms them for the next one.
    for flag in [env.changed(), units.changed()] {
        let env = Arc::downgrade(&env);
        let units = Arc::downgrade(&units);
        flag.invalidated().connect(move |_| {
            if let (Some(env), Some(units)) = (env.upgrade(), units.upgrade()) {
                if !(env.is_changed() | units.is_changed()) {
                    return;
                }
                println!("changed:");
                if let Err(err) = report(&env, &units) {
                    physics_warn!(error = %err, "cannot display environment");
                }
            }
        });
    }

    physics_info!("monitor started");
    println!("initial:");
    report(&env, &units)?;

    env.set_temperature(86.0, TemperatureUnit::Fahrenheit);
    units.set_measurement_units(&MeasurementUnitsValues {
        temperature: TemperatureUnit::Fahrenheit,
        pressure: PressureUnit::Atmospheres,
        ..MeasurementUnitsValues::default()
    });

    env.set_natural_environment(&NaturalEnvironmentValues {
        temperature_k: 263.15,
        humidity_relative: 80.0,
        pressure_pa: 98_000.0,
        air_attenuation_applied: false,
    })?;

    // Out of range: logged and ignored.
    env.set_pressure(-1.0, PressureUnit::Kilopascals);

    env.reset();
    units.reset();
    Ok(())
}
