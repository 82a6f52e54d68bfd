//! Fetch adapters.
//!
//! Every strategy exposes the same [`Fetcher`] contract so the engine never
//! needs strategy-specific handling or cleanup:
//! - `plain`: async reqwest client
//! - `challenge`: blocking cookie-keeping client run on the blocking pool
//! - `browser`: chromiumoxide session, reports the settled page address

mod browser;
mod challenge;
mod plain;
mod request;
mod response;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, LOCATION};

use crate::error_handling::FetchError;
use crate::strategy::Strategy;

pub use browser::{BrowserFetcher, BrowserOptions};
pub(crate) use browser::web_address;
pub use challenge::ChallengeFetcher;
pub use plain::PlainFetcher;
pub use request::RequestHeaders;

/// Status, headers and (textual, size-limited) body of one non-followed request.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Present only for textual bodies the engine may need to inspect.
    pub body: Option<String>,
}

impl FetchedResponse {
    /// The `Location` header, if present and non-empty.
    ///
    /// Raw non-ASCII bytes are decoded lossily rather than rejected.
    pub fn location(&self) -> Option<String> {
        let value = self.headers.get(LOCATION)?;
        let location = String::from_utf8_lossy(value.as_bytes());
        let location = location.trim();
        (!location.is_empty()).then(|| location.to_string())
    }
}

/// What a fetch produced.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// A raw HTTP response for the engine to interpret.
    Response(FetchedResponse),
    /// The adapter already followed the chain itself (browser); this is the address it ended on.
    Navigated(String),
}

/// Fetches one URL without following redirects.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError>;
}

/// One adapter per strategy.
#[derive(Clone)]
pub struct FetchAdapters {
    pub plain: Arc<dyn Fetcher>,
    pub challenge: Arc<dyn Fetcher>,
    pub browser: Arc<dyn Fetcher>,
}

impl FetchAdapters {
    pub fn for_strategy(&self, strategy: Strategy) -> &dyn Fetcher {
        match strategy {
            Strategy::Plain => self.plain.as_ref(),
            Strategy::ChallengeBypass => self.challenge.as_ref(),
            Strategy::BrowserAutomation => self.browser.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn response_with_location(value: &str) -> FetchedResponse {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_str(value).expect("valid header"));
        FetchedResponse {
            status: 302,
            headers,
            body: None,
        }
    }

    #[test]
    fn test_location_present() {
        assert_eq!(
            response_with_location(" https://a.test/ ").location().as_deref(),
            Some("https://a.test/")
        );
    }

    #[test]
    fn test_location_with_raw_utf8_bytes() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LOCATION,
            HeaderValue::from_bytes("https://a.test/café".as_bytes()).expect("opaque bytes allowed"),
        );
        let response = FetchedResponse {
            status: 302,
            headers,
            body: None,
        };
        assert_eq!(response.location().as_deref(), Some("https://a.test/café"));
    }

    #[test]
    fn test_location_blank_is_absent() {
        assert_eq!(response_with_location("").location(), None);
        let response = FetchedResponse {
            status: 302,
            headers: HeaderMap::new(),
            body: None,
        };
        assert_eq!(response.location(), None);
    }
}
