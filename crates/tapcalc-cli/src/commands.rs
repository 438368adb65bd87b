//! CLI command definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::LogFormat;

/// tapcalc: four-function keypad calculator
#[derive(Parser, Debug)]
#[command(name = "tapcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// JSON file with engine settings
    #[arg(short, long, global = true, env = "TAPCALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press keypad buttons and print the display after each one
    Press(PressArgs),

    /// Read captions from stdin, one line of presses at a time
    Repl,

    /// Print the keypad layout
    Layout,
}

/// Arguments for the press command
#[derive(Parser, Debug)]
pub struct PressArgs {
    /// Button captions, e.g. `5 + 3 = =`
    #[arg(required = true)]
    pub captions: Vec<String>,

    /// Print `caption -> display` for each press
    #[arg(short, long)]
    pub trace: bool,
}
