//! Calculator configuration

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, DisplayFormat, ERROR_DISPLAY, MAX_MAGNITUDE};

/// Engine configuration
///
/// Missing fields in serialized form fall back to the defaults, so a config
/// file only needs the settings it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Largest magnitude allowed on the display
    pub max_magnitude: f64,
    /// Text shown after an invalid result
    pub error_display: String,
    /// Display formatting rules
    pub format: DisplayFormat,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            max_magnitude: MAX_MAGNITUDE,
            error_display: ERROR_DISPLAY.to_string(),
            format: DisplayFormat::default(),
        }
    }
}

impl CalcConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the magnitude ceiling
    #[must_use]
    pub const fn with_max_magnitude(mut self, max_magnitude: f64) -> Self {
        self.max_magnitude = max_magnitude;
        self
    }

    /// Set the error token
    #[must_use]
    pub fn with_error_display(mut self, error_display: impl Into<String>) -> Self {
        self.error_display = error_display.into();
        self
    }

    /// Set the display format
    #[must_use]
    pub fn with_format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self
    }

    /// Loads configuration from JSON
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CalcError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes configuration to pretty JSON
    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalcError::Config(e.to_string()))
    }

    /// Rejects settings the engine cannot honor
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.max_magnitude.is_finite() && self.max_magnitude > 0.0) {
            return Err(CalcError::Config(format!(
                "max_magnitude must be positive and finite, got {}",
                self.max_magnitude
            )));
        }
        if self.error_display.is_empty() {
            return Err(CalcError::Config("error_display must not be empty".into()));
        }
        if self.format.decimal_separator == self.format.grouping_separator {
            return Err(CalcError::Config(
                "decimal and grouping separators must differ".into(),
            ));
        }
        if self.format.max_integer_digits == 0 {
            return Err(CalcError::Config(
                "max_integer_digits must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
