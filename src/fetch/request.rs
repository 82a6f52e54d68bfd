//! Browser-like request headers.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Realistic browser request headers to reduce bot detection.
///
/// Mimics a modern desktop browser navigation. `User-Agent` is not included:
/// it is drawn per request from the rotation pool. `Accept-Encoding` is left to
/// reqwest so that it can decompress what it advertised.
pub struct RequestHeaders;

impl RequestHeaders {
    const HEADERS: &'static [(&'static str, &'static str)] = &[
        (
            "accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
        ),
        ("accept-language", "en-US,en;q=0.9"),
        ("sec-fetch-dest", "document"),
        ("sec-fetch-mode", "navigate"),
        ("sec-fetch-site", "none"),
        ("sec-fetch-user", "?1"),
        ("upgrade-insecure-requests", "1"),
        ("cache-control", "max-age=0"),
    ];

    /// Headers as a map, for use as a client's default headers.
    pub fn header_map() -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(Self::HEADERS.len());
        for &(name, value) in Self::HEADERS {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
        headers
    }
}
