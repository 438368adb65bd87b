//! tapcalc CLI library
//!
//! Argument parsing, configuration loading, log setup and the command
//! runner behind the `tapcalc` binary.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod commands;
mod config;
mod error;
pub mod logging;
mod runner;

pub use commands::{Cli, Commands, PressArgs};
pub use config::{CliConfig, LogFormat, Verbosity};
pub use error::{CliError, CliResult};
pub use runner::KeypadRunner;
