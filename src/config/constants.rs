//! Configuration constants.
//!
//! This module defines the defaults and fixed operational limits used by the
//! resolution engine and its fetch adapters.

use std::time::Duration;

/// Maximum number of hops followed for a single input URL.
/// Nested shorteners rarely chain more than three deep.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Per-request timeout in seconds.
/// Generous because challenge interstitials and slow ad-gated shorteners are common.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// TCP connection timeout in seconds, capped by the request timeout.
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Maximum concurrent resolutions (admission slots).
pub const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// Seconds the browser session waits after navigation before reading its address.
/// Covers countdown timers and script redirects that fire after load.
pub const DEFAULT_BROWSER_SETTLE_SECS: u64 = 10;

/// Upper bound on page load during browser navigation, independent of the settle delay.
pub const BROWSER_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(45);

/// Maximum response body size in bytes (2MB).
/// Bodies larger than this are not inspected for embedded redirects.
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Number of requests the challenge client makes before giving up on an interstitial.
pub const CHALLENGE_MAX_ATTEMPTS: usize = 3;

/// Delay between challenge attempts.
/// Interstitials typically refuse clearance if the follow-up arrives in under ~4s.
pub const CHALLENGE_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Redirect status codes the engine interprets itself.
pub const REDIRECT_STATUS_CODES: &[u16] = &[301, 302, 303, 307, 308];

/// Fallback User-Agent when the configured pool is empty.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Default User-Agent pool.
///
/// Desktop browsers only; several shorteners serve app-install interstitials to
/// mobile agents instead of redirecting.
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    DEFAULT_USER_AGENT,
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.1 Safari/605.1.15",
];

/// Known URL shortener domains.
pub const DEFAULT_SHORTENERS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "goo.gl",
    "t.co",
    "ow.ly",
    "is.gd",
    "buff.ly",
    "adf.ly",
    "shorte.st",
    "linkshrink.net",
    "short.pe",
    "v.gd",
    "cutt.ly",
    "tiny.cc",
    "rebrand.ly",
    "bl.ink",
    "linklyhq.com",
    "rotf.lol",
    "shorturl.at",
    "ouo.io",
    "linkvertise.com",
    "magy.io",
    "exe.io",
    "sub2unlock.com",
];

/// Shorteners whose redirect only materializes after script execution or a countdown.
pub const DEFAULT_BROWSER_DOMAINS: &[&str] = &[
    "adf.ly",
    "shorte.st",
    "ouo.io",
    "linkvertise.com",
    "exe.io",
    "sub2unlock.com",
];
