//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, default domain lists)
//! - The `Config` type, usable programmatically or as the CLI surface

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, ConfigError, LogFormat, LogLevel};
