//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::Colorize;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// Plain lines read `12:04:31.207 DEBUG engine Hop 2/5 for ...`; JSON lines
/// carry the same fields (`ts`, `level`, `module`, `msg`) one object per line.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it for this crate. Noisy
/// dependencies (the CDP transport, HTML parsing, hyper) are capped so that
/// `--log-level debug` shows resolution hops rather than websocket frames.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger was already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug link_bypass "see https://bit.ly/abc"
///
/// # CLI level takes precedence for this crate
/// RUST_LOG=debug link_bypass --log-level info "https://bit.ly/abc"
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    for (module, cap) in NOISY_MODULES {
        builder.filter_module(module, *cap);
    }
    builder.filter_module("link_bypass", level);

    match format {
        LogFormat::Json => builder.format(|buf, record| {
            let line = serde_json::json!({
                "ts": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                "level": record.level().as_str(),
                "module": module_label(record.target()),
                "msg": record.args().to_string(),
            });
            writeln!(buf, "{line}")
        }),
        LogFormat::Plain => builder.format(|buf, record| {
            let level = match record.level() {
                log::Level::Error => "ERROR".red().bold(),
                log::Level::Warn => "WARN ".yellow(),
                log::Level::Info => "INFO ".green(),
                log::Level::Debug => "DEBUG".blue(),
                log::Level::Trace => "TRACE".purple(),
            };
            writeln!(
                buf,
                "{} {} {} {}",
                chrono::Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
                level,
                module_label(record.target()).cyan(),
                record.args()
            )
        }),
    };

    // stdout carries the report
    builder.target(env_logger::Target::Stderr);
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Dependencies capped regardless of the requested level.
const NOISY_MODULES: &[(&str, LevelFilter)] = &[
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("cookie_store", LevelFilter::Warn),
    // the CDP handler logs every websocket frame at debug
    ("chromiumoxide", LevelFilter::Warn),
    ("tungstenite", LevelFilter::Warn),
    ("async_tungstenite", LevelFilter::Warn),
];

/// Log target without the crate prefix: `engine`, `fetch::browser`.
fn module_label(target: &str) -> &str {
    target
        .strip_prefix("link_bypass::")
        .unwrap_or(target)
}
