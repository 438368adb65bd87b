//! Operator vocabulary and binary arithmetic
//!
//! Captions double as button labels, so `symbol()` must match the keypad
//! exactly.

use std::fmt;
use std::str::FromStr;

use crate::core::CalcError;

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Division (÷)
    Divide,
    /// Multiplication (×)
    Multiply,
    /// Subtraction (-)
    Subtract,
    /// Addition (+)
    Add,
}

impl BinaryOp {
    /// All binary operators in keypad order (top to bottom)
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the button caption
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Divide => "÷",
            Self::Multiply => "×",
            Self::Subtract => "-",
            Self::Add => "+",
        }
    }

    /// Applies the operator to `n1` and `n2` without validating the result.
    ///
    /// A zero dividend yields zero whatever the divisor, so `0 ÷ 0` is `0`
    /// while `n ÷ 0` for nonzero `n` is infinite.
    #[must_use]
    pub fn apply(&self, n1: f64, n2: f64) -> f64 {
        match self {
            Self::Divide => {
                if n1 == 0.0 {
                    0.0
                } else {
                    n1 / n2
                }
            }
            Self::Multiply => n1 * n2,
            Self::Subtract => n1 - n2,
            Self::Add => n1 + n2,
        }
    }
}

/// Every operation button on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// All clear (AC)
    AllClear,
    /// Sign flip (+/-)
    SignFlip,
    /// Percent (%)
    Percent,
    /// Binary operator (÷ × - +)
    Binary(BinaryOp),
    /// Equals (=)
    Equals,
}

impl Operation {
    /// The full vocabulary, in keypad order
    pub const ALL: [Self; 8] = [
        Self::AllClear,
        Self::SignFlip,
        Self::Percent,
        Self::Binary(BinaryOp::Divide),
        Self::Binary(BinaryOp::Multiply),
        Self::Binary(BinaryOp::Subtract),
        Self::Binary(BinaryOp::Add),
        Self::Equals,
    ];

    /// Returns the button caption
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::AllClear => "AC",
            Self::SignFlip => "+/-",
            Self::Percent => "%",
            Self::Binary(op) => op.symbol(),
            Self::Equals => "=",
        }
    }

    /// Returns the binary operator, if this is one
    #[must_use]
    pub const fn binary(&self) -> Option<BinaryOp> {
        match self {
            Self::Binary(op) => Some(*op),
            _ => None,
        }
    }
}

impl From<BinaryOp> for Operation {
    fn from(op: BinaryOp) -> Self {
        Self::Binary(op)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| CalcError::UnknownOperation(s.to_string()))
    }
}

/// Keys that edit the number being typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKey {
    /// A digit 0-9
    Digit(u8),
    /// The decimal point
    Decimal,
}

impl EntryKey {
    /// Creates a digit key, `None` unless `d` is 0-9
    #[must_use]
    pub const fn digit(d: u8) -> Option<Self> {
        if d <= 9 {
            Some(Self::Digit(d))
        } else {
            None
        }
    }

    /// Reads a digit or `.` character
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Decimal),
            _ => c
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .map(Self::Digit),
        }
    }

    /// Returns the character this key types
    #[must_use]
    pub fn as_char(&self) -> char {
        match self {
            Self::Digit(d) => char::from(b'0' + (*d).min(9)),
            Self::Decimal => '.',
        }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Any keypad press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Digit or decimal point
    Entry(EntryKey),
    /// Operation button
    Operation(Operation),
}

impl Key {
    /// Returns the button caption
    #[must_use]
    pub fn caption(&self) -> String {
        match self {
            Self::Entry(k) => k.to_string(),
            Self::Operation(op) => op.symbol().to_string(),
        }
    }
}

impl From<EntryKey> for Key {
    fn from(key: EntryKey) -> Self {
        Self::Entry(key)
    }
}

impl From<Operation> for Key {
    fn from(op: Operation) -> Self {
        Self::Operation(op)
    }
}

impl From<BinaryOp> for Key {
    fn from(op: BinaryOp) -> Self {
        Self::Operation(Operation::Binary(op))
    }
}

impl FromStr for Key {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(key) = EntryKey::from_char(c) {
                return Ok(Self::Entry(key));
            }
        }
        s.parse::<Operation>()
            .map(Self::Operation)
            .map_err(|_| CalcError::UnknownKey(s.to_string()))
    }
}
