//! Arithmetic engine: the keypad state machine
//!
//! The engine keeps one pending operation (left operand plus operator), a
//! count of consecutive equals presses and an entry-mode flag. All three are
//! held in [`EngineState`] and reset together.

use tracing::{debug, trace};

use crate::core::{
    BinaryOp, CalcConfig, EntryKey, Formatter, Operation, ResultValidator, ERROR_DISPLAY,
};

/// Left operand and operator waiting for the right operand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingOperation {
    /// Accumulated left operand (or the remembered right operand after `=`)
    pub accumulated: f64,
    /// Operator to apply
    pub operator: BinaryOp,
}

/// Mutable engine state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngineState {
    /// Pending binary operation, if any
    pub pending: Option<PendingOperation>,
    /// Consecutive equals presses since the last operand
    pub repeat_count: u32,
    /// Next digit starts a new number
    pub entry_mode: bool,
}

impl EngineState {
    /// Restores the freshly constructed state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns true if nothing is pending and no flag is set
    #[must_use]
    pub fn is_initial(&self) -> bool {
        *self == Self::default()
    }
}

/// Keypad calculator engine
#[derive(Debug, Clone)]
pub struct Engine {
    state: EngineState,
    formatter: Formatter,
    validator: ResultValidator,
    error_display: String,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with the default display rules
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: EngineState::default(),
            formatter: Formatter::new(),
            validator: ResultValidator::new(),
            error_display: ERROR_DISPLAY.to_string(),
        }
    }

    /// Creates an engine from a configuration
    #[must_use]
    pub fn with_config(config: &CalcConfig) -> Self {
        Self {
            state: EngineState::default(),
            formatter: Formatter::with_format(config.format.clone()),
            validator: ResultValidator::with_max_magnitude(config.max_magnitude),
            error_display: config.error_display.clone(),
        }
    }

    /// Returns the current state
    #[must_use]
    pub const fn state(&self) -> &EngineState {
        &self.state
    }

    /// Returns the pending operation
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingOperation> {
        self.state.pending.as_ref()
    }

    /// Returns the number of consecutive equals presses
    #[must_use]
    pub const fn repeat_count(&self) -> u32 {
        self.state.repeat_count
    }

    /// Returns true if the next digit starts a new number
    #[must_use]
    pub const fn is_entry_mode(&self) -> bool {
        self.state.entry_mode
    }

    /// Returns the display formatter
    #[must_use]
    pub const fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Returns the result validator
    #[must_use]
    pub const fn validator(&self) -> &ResultValidator {
        &self.validator
    }

    /// Returns the error token
    #[must_use]
    pub fn error_display(&self) -> &str {
        &self.error_display
    }

    /// Clears the pending operation, the equals count and entry mode
    pub fn reset(&mut self) {
        debug!("engine reset");
        self.state.reset();
    }

    /// Appends a digit or decimal point to the displayed number.
    ///
    /// Returns the new display text. If the number would exceed the
    /// magnitude ceiling the engine resets and the error token is returned.
    pub fn append(&mut self, key: EntryKey, current: &str) -> String {
        let separator = self.formatter.format().decimal_separator;

        if self.state.entry_mode {
            self.state.entry_mode = false;
            return match key {
                EntryKey::Decimal => format!("0{separator}"),
                EntryKey::Digit(_) => key.as_char().to_string(),
            };
        }

        match key {
            EntryKey::Decimal => {
                if current == self.error_display {
                    format!("0{separator}")
                } else if self.formatter.has_decimal_separator(current) {
                    current.to_string()
                } else {
                    format!("{current}{separator}")
                }
            }
            EntryKey::Digit(_) => {
                if current == "0" || current == self.error_display {
                    return key.as_char().to_string();
                }
                self.reformat_entry(&format!("{current}{}", key.as_char()))
            }
        }
    }

    /// Applies an operation to the displayed value.
    ///
    /// `None` means the result was invalid; the engine has already reset and
    /// the caller shows the error token.
    pub fn make(&mut self, operation: Operation, value: f64) -> Option<f64> {
        trace!(%operation, value, "make");
        match operation {
            Operation::AllClear => {
                self.reset();
                Some(0.0)
            }
            Operation::SignFlip => Some(-value),
            Operation::Percent => Some(value / 100.0),
            Operation::Equals => self.equals(value),
            Operation::Binary(op) => self.binary(op, value),
        }
    }

    fn equals(&mut self, value: f64) -> Option<f64> {
        self.state.repeat_count = self.state.repeat_count.saturating_add(1);

        let Some(pending) = self.state.pending else {
            return Some(value);
        };

        let result = if self.state.repeat_count == 1 {
            let result = self.calculate(pending.operator, pending.accumulated, value);
            if let Some(p) = self.state.pending.as_mut() {
                p.accumulated = value;
            }
            result
        } else {
            // Replay swaps the operands: the displayed result goes on the left.
            debug!(
                operator = pending.operator.symbol(),
                operand = pending.accumulated,
                repeat = self.state.repeat_count,
                "replaying last operation"
            );
            self.calculate(pending.operator, value, pending.accumulated)
        };

        if result.is_none() {
            self.reset();
        }
        result
    }

    fn binary(&mut self, op: BinaryOp, value: f64) -> Option<f64> {
        self.state.entry_mode = true;

        match self.state.pending {
            Some(pending) if self.state.repeat_count == 0 => {
                let Some(result) = self.calculate(pending.operator, pending.accumulated, value)
                else {
                    self.reset();
                    return None;
                };
                debug!(
                    folded = pending.operator.symbol(),
                    next = op.symbol(),
                    result,
                    "folded pending operation"
                );
                self.state.pending = Some(PendingOperation {
                    accumulated: result,
                    operator: op,
                });
                Some(result)
            }
            _ => {
                self.state.repeat_count = 0;
                self.state.pending = Some(PendingOperation {
                    accumulated: value,
                    operator: op,
                });
                Some(value)
            }
        }
    }

    /// Applies and validates a binary operation
    fn calculate(&self, op: BinaryOp, n1: f64, n2: f64) -> Option<f64> {
        match self.validator.validate(op.apply(n1, n2)) {
            Ok(result) => Some(result),
            Err(violation) => {
                debug!(operator = op.symbol(), n1, n2, %violation, "invalid result");
                None
            }
        }
    }

    /// Re-formats a typed number, enforcing the magnitude ceiling
    fn reformat_entry(&mut self, typed: &str) -> String {
        let formatted = self
            .formatter
            .parse_display(typed)
            .ok()
            .filter(|n| self.validator.is_valid(*n))
            .and_then(|n| self.formatter.format_number(n).ok());

        formatted.unwrap_or_else(|| {
            debug!(typed, "entry exceeds display capacity");
            self.reset();
            self.error_display.clone()
        })
    }
}
