//! Core calculator module
//!
//! Everything the keypad needs to turn keystrokes into a display:
//! - `engine`: pending-operation state machine and display accumulator
//! - `format`: number <-> display string conversion
//! - `operations`: the closed operator vocabulary and binary arithmetic
//! - `config`: magnitude ceiling, error token and display format settings

pub mod config;
pub mod engine;
pub mod format;
mod operations;

pub use config::CalcConfig;
pub use engine::{Engine, EngineState, PendingOperation};
pub use format::{DisplayFormat, Formatter};
pub use operations::{BinaryOp, EntryKey, Key, Operation};

use thiserror::Error;

/// Largest magnitude the display can hold (11 integer and 4 fractional digits)
pub const MAX_MAGNITUDE: f64 = 99_999_999_999.9999;

/// Text shown in place of a number after an invalid result
pub const ERROR_DISPLAY: &str = "Error (∞)";

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// Arithmetic failures never show up here: the engine absorbs them into the
/// error token. These are contract failures at the string boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Caption does not name any operation on the keypad
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
    /// Caption does not name any keypad button
    #[error("Unknown key: {0}")]
    UnknownKey(String),
    /// Display text could not be read back as a number
    #[error("Cannot read display value: {0:?}")]
    Unparseable(String),
    /// Value has no display representation (NaN or infinite)
    #[error("Cannot format value: {0}")]
    Unformattable(f64),
    /// Configuration could not be loaded or saved
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Reasons a computed value is rejected
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Violation {
    /// NaN detected in result
    #[error("NaN detected")]
    NaN,
    /// Infinity detected in result
    #[error("Infinite value detected")]
    Infinite,
    /// Result exceeds maximum magnitude
    #[error("Overflow: {0} exceeds maximum magnitude")]
    Overflow(f64),
}

/// Result validator applied to every binary computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultValidator {
    /// Maximum allowed result magnitude (inclusive)
    pub max_magnitude: f64,
}

impl Default for ResultValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultValidator {
    /// Creates a validator bounded by [`MAX_MAGNITUDE`]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_magnitude: MAX_MAGNITUDE,
        }
    }

    /// Creates a validator with custom maximum magnitude
    #[must_use]
    pub const fn with_max_magnitude(max_magnitude: f64) -> Self {
        Self { max_magnitude }
    }

    /// Returns the value if it can be displayed, or the violation
    pub fn validate(&self, value: f64) -> Result<f64, Violation> {
        if value.is_nan() {
            return Err(Violation::NaN);
        }
        if value.is_infinite() {
            return Err(Violation::Infinite);
        }
        if value.abs() > self.max_magnitude {
            return Err(Violation::Overflow(value));
        }
        Ok(value)
    }

    /// Returns true if the value is within the display ceiling
    #[must_use]
    pub fn is_valid(&self, value: f64) -> bool {
        self.validate(value).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== CalcError tests =====

    #[test]
    fn test_calc_error_display_unknown_operation() {
        let err = CalcError::UnknownOperation("sqrt".into());
        assert_eq!(format!("{err}"), "Unknown operation: sqrt");
    }

    #[test]
    fn test_calc_error_display_unparseable() {
        let err = CalcError::Unparseable("1.2.3".into());
        assert_eq!(format!("{err}"), "Cannot read display value: \"1.2.3\"");
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::UnknownKey("x".into()));
        assert!(err.to_string().contains("Unknown key"));
    }

    // ===== Violation tests =====

    #[test]
    fn test_violation_display() {
        assert_eq!(format!("{}", Violation::NaN), "NaN detected");
        assert_eq!(format!("{}", Violation::Infinite), "Infinite value detected");
        assert!(format!("{}", Violation::Overflow(1e12)).contains("exceeds maximum magnitude"));
    }

    // ===== ResultValidator tests =====

    #[test]
    fn test_validator_default_ceiling() {
        let v = ResultValidator::default();
        assert_eq!(v.max_magnitude, MAX_MAGNITUDE);
    }

    #[test]
    fn test_validate_accepts_ordinary_values() {
        let v = ResultValidator::new();
        assert_eq!(v.validate(42.0), Ok(42.0));
        assert_eq!(v.validate(-0.0001), Ok(-0.0001));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let v = ResultValidator::new();
        assert_eq!(v.validate(f64::NAN), Err(Violation::NaN));
    }

    #[test]
    fn test_validate_rejects_infinity() {
        let v = ResultValidator::new();
        assert_eq!(v.validate(f64::INFINITY), Err(Violation::Infinite));
        assert_eq!(v.validate(f64::NEG_INFINITY), Err(Violation::Infinite));
    }

    #[test]
    fn test_validate_at_boundary() {
        let v = ResultValidator::new();
        assert!(v.is_valid(MAX_MAGNITUDE));
        assert!(v.is_valid(-MAX_MAGNITUDE));
        assert!(!v.is_valid(100_000_000_000.0));
        assert!(matches!(
            v.validate(-100_000_000_000.0),
            Err(Violation::Overflow(_))
        ));
    }

    #[test]
    fn test_validator_custom_ceiling() {
        let v = ResultValidator::with_max_magnitude(100.0);
        assert!(v.is_valid(100.0));
        assert!(!v.is_valid(100.5));
    }
}
