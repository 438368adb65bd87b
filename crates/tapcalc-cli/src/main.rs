//! tapcalc: keypad calculator on the command line
//!
//! ## Usage
//!
//! ```bash
//! tapcalc press 5 + 3 = =         # prints 5, 5, 3, 8, 11
//! tapcalc press --trace 1 ÷ 0 =   # caption -> display per press
//! echo "1 2 × 3 =" | tapcalc repl
//! tapcalc layout
//! ```

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tapcalc_cli::{logging, Cli, CliConfig, CliResult, Commands, KeypadRunner, Verbosity};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    logging::init_tracing(config.verbosity, config.log_format)?;

    let mut runner = KeypadRunner::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Press(args) => runner.press(&args, &mut out)?,
        Commands::Repl => runner.repl(io::stdin().lock(), &mut out)?,
        Commands::Layout => runner.layout(&mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let config = CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_log_format(cli.log_format);

    match &cli.config {
        Some(path) => config.load_calc(path),
        None => Ok(config),
    }
}
