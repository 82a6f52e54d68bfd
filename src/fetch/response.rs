//! Response body handling shared by the HTTP adapters.

use std::io::Read;

use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE};

use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::FetchError;

/// True when the body could be HTML worth inspecting.
///
/// A missing `Content-Type` counts as textual; many shortener pages omit it.
pub(crate) fn is_textual(headers: &HeaderMap) -> bool {
    match headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        None => true,
        Some(content_type) => {
            let content_type = content_type.to_ascii_lowercase();
            content_type.starts_with("text/")
                || content_type.contains("html")
                || content_type.contains("xml")
        }
    }
}

fn declared_too_large(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        .is_some_and(|len| len > MAX_RESPONSE_BODY_SIZE)
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Reads a textual body up to `MAX_RESPONSE_BODY_SIZE`; `None` for binary or oversized bodies.
pub(crate) async fn read_body(
    mut response: reqwest::Response,
) -> Result<Option<String>, FetchError> {
    if !is_textual(response.headers()) || declared_too_large(response.headers()) {
        return Ok(None);
    }

    let mut buffer = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if buffer.len() + chunk.len() > MAX_RESPONSE_BODY_SIZE {
            log::debug!("Body of {} exceeds size limit, not inspecting", response.url());
            return Ok(None);
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(Some(decode(&buffer)))
}

/// Blocking counterpart of [`read_body`].
pub(crate) fn read_body_blocking(
    response: reqwest::blocking::Response,
) -> Result<Option<String>, FetchError> {
    if !is_textual(response.headers()) || declared_too_large(response.headers()) {
        return Ok(None);
    }

    let mut buffer = Vec::new();
    let limit = MAX_RESPONSE_BODY_SIZE as u64 + 1;
    response
        .take(limit)
        .read_to_end(&mut buffer)
        .map_err(|e| FetchError::Worker(format!("failed to read body: {e}")))?;
    if buffer.len() > MAX_RESPONSE_BODY_SIZE {
        return Ok(None);
    }
    Ok(Some(decode(&buffer)))
}
