//! tapcalc - keypad calculator engine
//!
//! The logic behind a four-function pocket calculator: digits and the decimal
//! point build up the display, operation buttons drive a small state machine
//! with one pending operation, and pressing `=` again replays the last step.
//!
//! # Example
//!
//! ```rust
//! use tapcalc::prelude::*;
//!
//! let mut engine = Engine::new();
//! let shown = engine.append(EntryKey::Digit(5), "0");
//! assert_eq!(shown, "5");
//!
//! assert_eq!(engine.make(BinaryOp::Add.into(), 5.0), Some(5.0));
//! assert_eq!(engine.make(Operation::Equals, 3.0), Some(8.0));
//! assert_eq!(engine.make(Operation::Equals, 8.0), Some(11.0));
//!
//! // Division of a nonzero number by zero is invalid
//! engine.make(BinaryOp::Divide.into(), 1.0);
//! assert_eq!(engine.make(Operation::Equals, 0.0), None);
//! ```

// Allow common test patterns in this crate
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;
pub mod keypad;
pub mod session;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::{
        BinaryOp, CalcConfig, CalcError, CalcResult, DisplayFormat, Engine, EngineState, EntryKey,
        Formatter, Key, Operation, PendingOperation, ResultValidator, Violation, ERROR_DISPLAY,
        MAX_MAGNITUDE,
    };
    pub use crate::driver::CalculatorDriver;
    pub use crate::keypad::{Keypad, KeypadButton};
    pub use crate::session::Session;
}
