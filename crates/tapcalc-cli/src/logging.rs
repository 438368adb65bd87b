//! Log subscriber setup
//!
//! Events go to stderr so stdout carries only display output.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, Verbosity};
use crate::error::{CliError, CliResult};

/// Builds the event filter: a non-empty, valid `RUST_LOG` wins over the
/// verbosity flags
#[must_use]
pub fn filter_for(verbosity: Verbosity, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(verbosity.filter_directive()))
}

/// Installs the global subscriber
pub fn init_tracing(verbosity: Verbosity, format: LogFormat) -> CliResult<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity, rust_log.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| CliError::config(format!("cannot install log subscriber: {e}")))
}
