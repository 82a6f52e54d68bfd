//! HTTP client initialization.
//!
//! Both clients have automatic redirect following disabled: the engine walks
//! every hop itself so it can choose a strategy per host.

use std::time::Duration;

use reqwest::redirect::Policy;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};
use crate::fetch::RequestHeaders;

fn connect_timeout(timeout: Duration) -> Duration {
    timeout.min(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
}

/// Initializes the shared async client used by the plain strategy.
///
/// Creates a `reqwest::Client` with:
/// - redirects disabled
/// - request timeout from config, connect timeout capped at `TCP_CONNECT_TIMEOUT_SECS`
/// - browser-like default headers (User-Agent is set per request)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_redirect_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    let timeout = config.timeout();
    reqwest::Client::builder()
        .redirect(Policy::none())
        .timeout(timeout)
        .connect_timeout(connect_timeout(timeout))
        .default_headers(RequestHeaders::header_map())
        .build()
}

/// Initializes a cookie-keeping blocking client for one challenge fetch.
///
/// Must be called (and the client dropped) on a blocking thread: the blocking
/// client owns its own runtime and panics if created inside an async context.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_challenge_client(
    timeout: Duration,
    user_agent: &str,
) -> Result<reqwest::blocking::Client, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .redirect(Policy::none())
        .cookie_store(true)
        .timeout(timeout)
        .connect_timeout(connect_timeout(timeout))
        .user_agent(user_agent)
        .default_headers(RequestHeaders::header_map())
        .build()
}
