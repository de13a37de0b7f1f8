//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with either the colored plain format or one JSON
/// object per line. `RUST_LOG` is read first and then overridden by `level`,
/// so `--log-level` always wins for this crate's own messages.
///
/// Logs go to stderr; stdout is reserved for the report bundle.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Trace the session state machine
/// RUST_LOG=fiscal_status=trace fiscal_status 20123456789
///
/// # Machine-readable logs next to the JSON report
/// fiscal_status 20123456789 --log-format json 2> run.log
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    // Legacy pages trip a lot of html5ever parse-error logging
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("rustls", LevelFilter::Warn);
    builder.filter_module("cookie_store", LevelFilter::Warn);
    builder.filter_module("fiscal_status", level);
    builder.target(env_logger::Target::Stderr);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = serde_json::json!({
                    "ts": chrono::Utc::now().timestamp_millis(),
                    "level": record.level().as_str(),
                    "target": record.target(),
                    "msg": record.args().to_string(),
                });
                writeln!(buf, "{}", line)
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                let (marker, level) = styled_level(record.level());
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    marker,
                    record.target().cyan(),
                    level,
                    record.args()
                )
            });
        }
    }

    // try_init so tests that share a process do not panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Emoji marker and colored name for a level.
fn styled_level(level: Level) -> (&'static str, ColoredString) {
    let name = level.as_str();
    match level {
        Level::Error => ("❌", name.red()),
        Level::Warn => ("⚠️", name.yellow()),
        Level::Info => ("✔️", name.green()),
        Level::Debug => ("🔍", name.blue()),
        Level::Trace => ("🔬", name.purple()),
    }
}
