//! Command execution against a keypad session

use std::io::{BufRead, Write};

use tapcalc::session::Session;
use tracing::{debug, info};

use crate::commands::PressArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Words that end a REPL session
const QUIT_WORDS: [&str; 2] = ["quit", "exit"];

/// Runs CLI commands against one calculator session
#[derive(Debug)]
pub struct KeypadRunner {
    session: Session,
    config: CliConfig,
}

impl KeypadRunner {
    /// Creates a runner with a fresh session
    #[must_use]
    pub fn new(config: CliConfig) -> Self {
        Self {
            session: Session::with_config(&config.calc),
            config,
        }
    }

    /// Returns the session
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the configuration
    #[must_use]
    pub const fn config(&self) -> &CliConfig {
        &self.config
    }

    /// Presses each caption, writing the display after every press.
    ///
    /// Stops at the first unknown caption.
    pub fn press<W: Write>(&mut self, args: &PressArgs, out: &mut W) -> CliResult<()> {
        if args.captions.is_empty() {
            return Err(CliError::invalid_argument("press needs at least one caption"));
        }
        for caption in &args.captions {
            self.session.press_caption(caption)?;
            if args.trace {
                writeln!(out, "{caption} -> {}", self.session.display())?;
            } else {
                writeln!(out, "{}", self.session.display())?;
            }
        }
        info!(presses = args.captions.len(), display = %self.session.display(), "press done");
        Ok(())
    }

    /// Reads whitespace-separated captions line by line, writing the display
    /// after each line.
    ///
    /// An unknown caption abandons the rest of its line; the session keeps
    /// the presses made before it. The error is echoed unless quiet.
    pub fn repl<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> CliResult<()> {
        for line in input.lines() {
            let line = line?;
            let captions: Vec<&str> = line.split_whitespace().collect();
            if captions.is_empty() {
                continue;
            }
            if captions.len() == 1 && QUIT_WORDS.contains(&captions[0]) {
                break;
            }

            match self.session.press_all(captions) {
                Ok(_) => writeln!(out, "{}", self.session.display())?,
                Err(e) => {
                    debug!(error = %e, "line abandoned");
                    if !self.config.verbosity.is_quiet() {
                        writeln!(out, "{e}")?;
                    }
                    writeln!(out, "{}", self.session.display())?;
                }
            }
            out.flush()?;
        }
        Ok(())
    }

    /// Writes the keypad grid, marking the highlighted operator
    pub fn layout<W: Write>(&self, out: &mut W) -> CliResult<()> {
        let grid = self
            .session
            .keypad()
            .render(self.session.selected_operator());
        out.write_all(grid.as_bytes())?;
        Ok(())
    }
}
