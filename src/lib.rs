//! link_bypass library: resolving shortened URLs to their final destination
//!
//! This library follows redirect chains hop by hop (HTTP redirects, meta-refresh
//! and script redirects on shortener pages), escalating per host to a
//! challenge-bypass client or a real browser for shorteners that resist plain
//! HTTP. Results are cached per original URL and concurrent resolutions are
//! bounded by an admission gate.
//!
//! # Example
//!
//! ```no_run
//! use link_bypass::{extract_urls, format_report, Config, Resolver};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     max_depth: 3,
//!     enable_browser: false,
//!     ..Default::default()
//! };
//! let resolver = Resolver::from_config(&config)?;
//!
//! let urls = extract_urls("two links: https://bit.ly/abc and https://t.co/xyz");
//! let entries = resolver.resolve_batch(urls).await;
//! println!("{}", format_report(&entries));
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime (multi-threaded for the challenge
//! client, which runs on the blocking pool). Browser automation needs a local
//! Chromium or Chrome.

#![warn(missing_docs)]

pub mod admission;
pub mod app;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod redirect;
pub mod registry;
pub mod strategy;
pub mod user_agent;
mod utils;

// Re-export public API
pub use app::{extract_urls, format_report};
pub use config::{Config, LogFormat, LogLevel};
pub use engine::{BatchEntry, Outcome, Resolver, ResolverSettings};
pub use error_handling::{FetchError, InitializationError, ProcessingStats, ResolveError};
