//! Error type definitions.
//!
//! This module defines the error enums surfaced by initialization, fetching and
//! resolution, plus the counter categories recorded in `ProcessingStats`.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::config::ConfigError;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Configuration failed validation.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// A single hop's fetch failed.
///
/// Never returned from `Resolver::resolve`; the engine logs it, records it in
/// the resolution state and returns the last good URL.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure reported by reqwest.
    #[error("HTTP request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The fetch exceeded its deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Status the adapter cannot interpret (4xx/5xx).
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// An anti-bot interstitial was still served after every attempt.
    #[error("anti-bot challenge not cleared after {0} attempts")]
    ChallengeUnsolved(usize),

    /// The interstitial asks for a CAPTCHA.
    #[error("page requires a CAPTCHA")]
    CaptchaRequired,

    /// The browser could not be configured or started.
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    /// The browser started but could not load the page or report its address.
    #[error("browser navigation failed: {0}")]
    BrowserNavigation(String),

    /// A blocking worker panicked or was cancelled.
    #[error("fetch worker failed: {0}")]
    Worker(String),
}

impl FetchError {
    /// Maps the error onto its statistics category.
    pub fn error_type(&self) -> ErrorType {
        match self {
            FetchError::Http(e) => super::categorize_reqwest_error(e),
            FetchError::Timeout(_) => ErrorType::HttpRequestTimeoutError,
            FetchError::Status(code) => super::categorize_status(*code),
            FetchError::ChallengeUnsolved(_) => ErrorType::ChallengeUnsolved,
            FetchError::CaptchaRequired => ErrorType::CaptchaRequired,
            FetchError::BrowserLaunch(_) => ErrorType::BrowserLaunchError,
            FetchError::BrowserNavigation(_) => ErrorType::BrowserNavigationError,
            FetchError::Worker(_) => ErrorType::WorkerTaskError,
        }
    }
}

/// A resolution could not even start.
///
/// These are the only failures that reach a batch result; fetch failures are
/// absorbed by the engine.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Input is not an absolute URL.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },

    /// Input parses but is not http or https.
    #[error("unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),

    /// The admission semaphore was closed.
    #[error("admission gate closed")]
    AdmissionClosed,
}

/// Types of errors that can occur while fetching a hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // HTTP/Network errors
    HttpRequestBuilderError,
    HttpRequestTimeoutError,
    HttpRequestRequestError,
    HttpRequestConnectError,
    HttpRequestBodyError,
    HttpRequestDecodeError,
    HttpRequestOtherError,
    HttpRequestTooManyRequests,
    HttpRequestBotDetectionError, // 403 Forbidden - typically bot detection
    HttpRequestNotFound,          // 404 Not Found
    HttpRequestClientError,       // Other 4xx
    HttpRequestServerError,       // 5xx
    // Anti-bot challenge errors
    ChallengeUnsolved,
    CaptchaRequired,
    // Browser automation errors
    BrowserLaunchError,
    BrowserNavigationError,
    WorkerTaskError,
}

/// Notable resolution events that are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    CacheHit,
    HttpRedirect,
    MetaRefreshRedirect,
    ScriptRedirect,
    BrowserNavigation,
    AmbiguousRedirect, // 3xx without Location
    DepthExhausted,
    ChallengeCleared,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::HttpRequestTooManyRequests => "Too many requests",
            ErrorType::HttpRequestBotDetectionError => "Bot detection (403 Forbidden)",
            ErrorType::HttpRequestNotFound => "Not Found (404)",
            ErrorType::HttpRequestClientError => "Client error (4xx)",
            ErrorType::HttpRequestServerError => "Server error (5xx)",
            ErrorType::ChallengeUnsolved => "Anti-bot challenge not cleared",
            ErrorType::CaptchaRequired => "CAPTCHA required",
            ErrorType::BrowserLaunchError => "Browser launch error",
            ErrorType::BrowserNavigationError => "Browser navigation error",
            ErrorType::WorkerTaskError => "Fetch worker error",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::CacheHit => "Cache hit",
            InfoType::HttpRedirect => "HTTP redirect",
            InfoType::MetaRefreshRedirect => "Meta refresh redirect",
            InfoType::ScriptRedirect => "Script redirect",
            InfoType::BrowserNavigation => "Browser navigation",
            InfoType::AmbiguousRedirect => "Redirect without Location",
            InfoType::DepthExhausted => "Hop budget exhausted",
            InfoType::ChallengeCleared => "Anti-bot challenge cleared",
        }
    }
}
