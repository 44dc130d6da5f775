//! Logging bootstrap for the binary.
//!
//! The library only emits through the `log` facade; this module wires a
//! `flexi_logger` backend writing to stderr.
//!
//! # Invariants
//! - Initialization happens at most once per process; later calls are no-ops
//!   that report the level already in effect.
//! - Initialization never panics.
//! - `RUST_LOG`, when set, wins over the requested level.

use flexi_logger::{Logger, LoggerHandle};
use once_cell::sync::OnceCell;

static LOGGER: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    _handle: LoggerHandle,
}

/// Start logging at `level` unless `RUST_LOG` says otherwise.
///
/// Returns the level that is active after the call.
pub fn init_logging(level: &str) -> Result<&'static str, String> {
    let level = normalize_level(level)?;
    let state = LOGGER.get_or_try_init(|| -> Result<LoggingState, String> {
        let handle = Logger::try_with_env_or_str(level)
            .map_err(|err| format!("invalid log specification `{level}`: {err}"))?
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;

        log::debug!(
            "Logging started at {} (rolodex {})",
            level,
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            level,
            _handle: handle,
        })
    })?;
    Ok(state.level)
}

/// Level for a run: `--verbose` forces debug, otherwise the configured one.
pub fn effective_level(verbose: bool, configured: &str) -> &str {
    if verbose {
        "debug"
    } else {
        configured
    }
}

pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}
