//! Logger setup for the command-line binary

use crate::io::error::Result;
use flexi_logger::{Logger, LoggerHandle};

/// Start logging to stderr
///
/// `RUST_LOG` takes precedence over `level`. The returned handle must stay
/// alive for as long as log output is wanted.
///
/// # Errors
///
/// Returns an error if the level specification is invalid or a logger is
/// already installed
pub fn setup_logging(level: &str) -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(flexi_logger::colored_default_format)
        .start()?;
    Ok(handle)
}
