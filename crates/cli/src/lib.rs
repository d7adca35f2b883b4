//! Shared plumbing for the terranav binaries.

use std::fmt::Display;

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Start stderr logging. `RUST_LOG` wins; otherwise `-v` raises the level from `warn`.
pub fn init_logging(verbose: u8) -> Result<LoggerHandle, FlexiLoggerError> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    Logger::try_with_env_or_str(level)?.log_to_stderr().start()
}

/// Render an optional value, or `n/a` when it is unavailable.
pub fn or_na<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}
