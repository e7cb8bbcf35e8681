//! Error types for unit conversion and the settings layer.

use std::path::PathBuf;

use crate::units::DimensionKind;

/// Result type alias for unit-aware operations.
pub type UnitResult<T> = std::result::Result<T, UnitError>;

/// Errors raised by conversions and quantity accessors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    /// The unit is a recognized member of its kind but has no conversion entry.
    #[error("unsupported {dimension} unit '{unit}'")]
    UnsupportedUnit {
        dimension: DimensionKind,
        unit: String,
    },

    /// A unit of one dimension was used with a quantity of another.
    #[error("expected a {expected} unit, got {found} unit '{unit}'")]
    DimensionMismatch {
        expected: DimensionKind,
        found: DimensionKind,
        unit: String,
    },

    /// A unit name could not be parsed.
    #[error("unknown unit name '{0}'")]
    UnknownUnitName(String),

    /// A canonical value is outside the physically meaningful range.
    #[error("invalid {dimension} value {value}: {reason}")]
    InvalidValue {
        dimension: DimensionKind,
        value: f64,
        reason: &'static str,
    },

    /// A composite was constructed from values that contradict each other.
    #[error("invalid field combination: {0}")]
    InvalidFieldCombination(String),

    /// A conversion table entry is malformed.
    #[error("invalid conversion for {dimension} unit '{unit}': {reason}")]
    InvalidConversion {
        dimension: DimensionKind,
        unit: String,
        reason: &'static str,
    },
}

impl UnitError {
    /// Create an unsupported-unit error.
    pub fn unsupported(dimension: DimensionKind, unit: impl ToString) -> Self {
        Self::UnsupportedUnit {
            dimension,
            unit: unit.to_string(),
        }
    }

    /// Create an invalid-value error.
    pub fn invalid_value(dimension: DimensionKind, value: f64, reason: &'static str) -> Self {
        Self::InvalidValue {
            dimension,
            value,
            reason,
        }
    }
}

/// Result type alias for settings persistence.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading or saving settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to access settings file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization error.
    #[error("JSON settings error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML settings parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML settings write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// The file extension does not name a supported format.
    #[error("unsupported settings format for '{0}'")]
    UnsupportedFormat(PathBuf),

    /// The settings parsed but describe invalid physical values.
    #[error("invalid settings: {0}")]
    Invalid(#[from] UnitError),
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
