//! Settings persistence.
//!
//! [`PhysicsSettings`] is the serializable document for the models in this
//! crate. It round-trips through TOML or JSON; missing sections and fields
//! take their documented defaults, so a partial file is valid.
//!
//! ```
//! use horizon_physics::{PhysicsSettings, TemperatureUnit};
//!
//! let settings = PhysicsSettings::from_toml_str(
//!     r#"
//!     [measurement_units]
//!     temperature = "fahrenheit"
//!
//!     [natural_environment]
//!     temperature_k = 300.0
//!     "#,
//! )?;
//! assert_eq!(settings.measurement_units.temperature, TemperatureUnit::Fahrenheit);
//! assert_eq!(settings.natural_environment.humidity_relative, 50.0);
//! # Ok::<(), horizon_physics::ConfigError>(())
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use horizon_physics_core::PerfSpan;
use horizon_physics_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::model::{
    Extents2D, MeasurementUnits, MeasurementUnitsValues, NaturalEnvironment,
    NaturalEnvironmentValues,
};

/// On-disk format of a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    /// JSON format.
    Json,
    /// TOML format.
    Toml,
}

impl SettingsFormat {
    /// Pick the format from the file extension (`.toml` or `.json`,
    /// case-insensitive).
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Serializable snapshot of every physics setting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub measurement_units: MeasurementUnitsValues,
    pub natural_environment: NaturalEnvironmentValues,
    pub extents: Extents2D,
}

impl PhysicsSettings {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let settings: Self = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize as pretty TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the stored values are physically meaningful.
    pub fn validate(&self) -> ConfigResult<()> {
        self.natural_environment.validate()?;
        Ok(())
    }

    /// Load from `path`, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let _span = PerfSpan::new("settings_load");
        let format = SettingsFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

        let settings = match format {
            SettingsFormat::Toml => Self::from_toml_str(&content),
            SettingsFormat::Json => Self::from_json_str(&content),
        }
        .inspect_err(|err| {
            tracing::warn!(target: targets::CONFIG, path = %path.display(), error = %err, "failed to load settings");
        })?;

        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?format, "settings loaded");
        Ok(settings)
    }

    /// Save to `path`, choosing the format by extension.
    ///
    /// The file is written to a sibling temporary file and renamed into place.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let _span = PerfSpan::new("settings_save");
        let content = match SettingsFormat::from_path(path)? {
            SettingsFormat::Toml => self.to_toml_string()?,
            SettingsFormat::Json => self.to_json_string()?,
        };
        atomic_write(path, content.as_bytes())?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "settings saved");
        Ok(())
    }

    /// Snapshot live models.
    pub fn capture(
        units: &MeasurementUnits,
        environment: &NaturalEnvironment,
        extents: &Extents2D,
    ) -> Self {
        Self {
            measurement_units: units.values(),
            natural_environment: environment.values(),
            extents: *extents,
        }
    }

    /// Push these settings into live models. Each model publishes exactly one
    /// change notification.
    pub fn apply_to(
        &self,
        units: &MeasurementUnits,
        environment: &NaturalEnvironment,
    ) -> ConfigResult<()> {
        environment.set_natural_environment(&self.natural_environment)?;
        units.set_measurement_units(&self.measurement_units);
        Ok(())
    }
}

fn atomic_write(path: &Path, bytes: &[u8]) -> ConfigResult<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    let write = || -> std::io::Result<()> {
        let mut file = fs::File::create(tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(tmp, path)
    };

    write().map_err(|e| {
        let _ = fs::remove_file(tmp);
        ConfigError::io(path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnitError;
    use crate::units::{AngleUnit, PressureUnit};

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SettingsFormat::from_path(Path::new("a/b.toml")).unwrap(),
            SettingsFormat::Toml
        );
        assert_eq!(
            SettingsFormat::from_path(Path::new("b.JSON")).unwrap(),
            SettingsFormat::Json
        );
        assert!(matches!(
            SettingsFormat::from_path(Path::new("b.yaml")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(SettingsFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_empty_documents_are_defaults() {
        assert_eq!(PhysicsSettings::from_toml_str("").unwrap(), PhysicsSettings::default());
        assert_eq!(PhysicsSettings::from_json_str("{}").unwrap(), PhysicsSettings::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut settings = PhysicsSettings::default();
        settings.measurement_units.angle = AngleUnit::Radians;
        settings.measurement_units.pressure = PressureUnit::Millibars;
        settings.natural_environment.air_attenuation_applied = false;
        settings.extents = Extents2D::new(1.0, 2.0, 3.0, 4.0);

        let text = settings.to_toml_string().unwrap();
        assert!(text.contains("pressure = \"millibars\""));
        assert_eq!(PhysicsSettings::from_toml_str(&text).unwrap(), settings);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = PhysicsSettings::from_json_str(
            r#"{ "natural_environment": { "humidity_relative": 150.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(UnitError::InvalidFieldCombination(_))
        ));
    }

    #[test]
    fn test_unknown_unit_name_is_parse_error() {
        let err = PhysicsSettings::from_toml_str("[measurement_units]\ndistance = \"furlongs\"")
            .unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_apply_and_capture() {
        let units = MeasurementUnits::new();
        let environment = NaturalEnvironment::new();

        let mut settings = PhysicsSettings::default();
        settings.measurement_units = MeasurementUnitsValues::MKS;
        settings.natural_environment.temperature_k = 280.0;
        settings.apply_to(&units, &environment).unwrap();

        assert_eq!(units.changed().notify_count(), 1);
        assert_eq!(environment.changed().notify_count(), 1);

        let captured = PhysicsSettings::capture(&units, &environment, &settings.extents);
        assert_eq!(captured, settings);
    }
}
