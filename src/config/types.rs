//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, ValueEnum};
use thiserror::Error;

use crate::config::constants::{
    DEFAULT_BROWSER_DOMAINS, DEFAULT_BROWSER_SETTLE_SECS, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_MAX_DEPTH, DEFAULT_SHORTENERS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENTS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Configuration rejected by [`Config::validate`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric limit that must be positive was zero.
    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),

    /// The shortener list is empty, so nothing would ever be unwrapped.
    #[error("shortener list is empty")]
    NoShorteners,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Resolver configuration.
///
/// Loaded once at startup and immutable afterwards. Can be constructed
/// programmatically or flattened into a `clap` parser; every option also reads
/// a `LINK_BYPASS_*` environment variable.
///
/// # Examples
///
/// ```no_run
/// use link_bypass::Config;
///
/// let config = Config {
///     max_depth: 3,
///     enable_browser: false,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, env = "LINK_BYPASS_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, env = "LINK_BYPASS_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Maximum hops followed per URL
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, env = "LINK_BYPASS_MAX_DEPTH")]
    pub max_depth: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "LINK_BYPASS_TIMEOUT_SECONDS")]
    pub timeout_seconds: u64,

    /// Maximum concurrent resolutions
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY, env = "LINK_BYPASS_MAX_CONCURRENCY")]
    pub max_concurrency: usize,

    /// Route non-browser hosts through the anti-bot challenge client
    #[arg(long, default_value_t = true, action = ArgAction::Set, env = "LINK_BYPASS_ENABLE_CHALLENGE_BYPASS")]
    pub enable_challenge_bypass: bool,

    /// Use a real browser for hosts listed in --browser-domains
    #[arg(long, default_value_t = true, action = ArgAction::Set, env = "LINK_BYPASS_ENABLE_BROWSER")]
    pub enable_browser: bool,

    /// Run the browser without a visible window
    #[arg(long, default_value_t = true, action = ArgAction::Set, env = "LINK_BYPASS_HEADLESS")]
    pub headless: bool,

    /// Shortener domains (comma separated)
    #[arg(long, value_delimiter = ',', default_values_t = owned(DEFAULT_SHORTENERS), env = "LINK_BYPASS_SHORTENERS")]
    pub shorteners: Vec<String>,

    /// Domains that need browser automation (comma separated)
    #[arg(long, value_delimiter = ',', default_values_t = owned(DEFAULT_BROWSER_DOMAINS), env = "LINK_BYPASS_BROWSER_DOMAINS")]
    pub browser_domains: Vec<String>,

    /// Seconds to let a browser page settle before reading its address
    #[arg(long, default_value_t = DEFAULT_BROWSER_SETTLE_SECS, env = "LINK_BYPASS_BROWSER_SETTLE_SECONDS")]
    pub browser_settle_seconds: u64,

    /// Chromium/Chrome executable (auto-detected when omitted)
    #[arg(long, env = "LINK_BYPASS_BROWSER_EXECUTABLE")]
    pub browser_executable: Option<PathBuf>,

    /// User-Agent pool (comma separated)
    #[arg(long, value_delimiter = ',', default_values_t = owned(DEFAULT_USER_AGENTS), env = "LINK_BYPASS_USER_AGENTS")]
    pub user_agents: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_depth: DEFAULT_MAX_DEPTH,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            enable_challenge_bypass: true,
            enable_browser: true,
            headless: true,
            shorteners: owned(DEFAULT_SHORTENERS),
            browser_domains: owned(DEFAULT_BROWSER_DOMAINS),
            browser_settle_seconds: DEFAULT_BROWSER_SETTLE_SECS,
            browser_executable: None,
            user_agents: owned(DEFAULT_USER_AGENTS),
        }
    }
}

impl Config {
    /// Checks limits that would make the resolver useless or hang.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroLimit("max_depth"));
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroLimit("max_concurrency"));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::ZeroLimit("timeout_seconds"));
        }
        if self.shorteners.iter().all(|s| s.trim().is_empty()) {
            return Err(ConfigError::NoShorteners);
        }
        Ok(())
    }

    /// Per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Browser settle delay as a `Duration`.
    pub fn browser_settle(&self) -> Duration {
        Duration::from_secs(self.browser_settle_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.max_concurrency, 5);
        assert!(config.enable_challenge_bypass);
        assert!(config.enable_browser);
        assert!(config.headless);
        assert_eq!(config.shorteners.len(), DEFAULT_SHORTENERS.len());
        assert!(config.shorteners.iter().any(|s| s == "bit.ly"));
        assert!(config.browser_executable.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_defaults_match_default_impl() {
        let cli = TestCli::try_parse_from(["link_bypass"]).expect("defaults should parse");
        let default = Config::default();
        assert_eq!(cli.config.max_depth, default.max_depth);
        assert_eq!(cli.config.timeout_seconds, default.timeout_seconds);
        assert_eq!(cli.config.shorteners, default.shorteners);
        assert_eq!(cli.config.browser_domains, default.browser_domains);
        assert_eq!(cli.config.user_agents, default.user_agents);
        assert!(cli.config.enable_browser);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = TestCli::try_parse_from([
            "link_bypass",
            "--max-depth",
            "2",
            "--enable-browser",
            "false",
            "--shorteners",
            "a.test,b.test",
        ])
        .expect("overrides should parse");
        assert_eq!(cli.config.max_depth, 2);
        assert!(!cli.config.enable_browser);
        assert_eq!(cli.config.shorteners, vec!["a.test", "b.test"]);
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let config = Config {
            max_depth: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLimit("max_depth")));

        let config = Config {
            max_concurrency: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroLimit("max_concurrency"))
        );

        let config = Config {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroLimit("timeout_seconds"))
        );
    }

    #[test]
    fn test_validate_rejects_empty_shorteners() {
        let config = Config {
            shorteners: vec![" ".to_string()],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoShorteners));
    }

    #[test]
    fn test_durations() {
        let config = Config {
            timeout_seconds: 7,
            browser_settle_seconds: 3,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(7));
        assert_eq!(config.browser_settle(), Duration::from_secs(3));
    }
}
