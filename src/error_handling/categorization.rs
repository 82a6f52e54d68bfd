//! Error categorization.
//!
//! Maps transport errors and uninterpretable statuses onto `ErrorType`.

use super::types::ErrorType;

/// Categorizes an HTTP status the fetch adapters refuse to interpret.
pub fn categorize_status(status: u16) -> ErrorType {
    match status {
        403 => ErrorType::HttpRequestBotDetectionError,
        404 => ErrorType::HttpRequestNotFound,
        429 => ErrorType::HttpRequestTooManyRequests,
        400..=499 => ErrorType::HttpRequestClientError,
        500..=599 => ErrorType::HttpRequestServerError,
        _ => ErrorType::HttpRequestOtherError,
    }
}

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Status-bearing errors are mapped through [`categorize_status`]; the rest by
/// the phase reqwest reports.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if let Some(status) = error.status() {
        return categorize_status(status.as_u16());
    }

    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_status() {
        assert_eq!(
            categorize_status(403),
            ErrorType::HttpRequestBotDetectionError
        );
        assert_eq!(categorize_status(404), ErrorType::HttpRequestNotFound);
        assert_eq!(
            categorize_status(429),
            ErrorType::HttpRequestTooManyRequests
        );
        assert_eq!(categorize_status(410), ErrorType::HttpRequestClientError);
        assert_eq!(categorize_status(503), ErrorType::HttpRequestServerError);
        assert_eq!(categorize_status(999), ErrorType::HttpRequestOtherError);
    }

    #[test]
    fn test_categorize_builder_error() {
        // An unparseable URL fails in the builder phase without touching the network
        let err = reqwest::Client::new()
            .get("not a url")
            .build()
            .expect_err("invalid URL should not build");
        assert_eq!(
            categorize_reqwest_error(&err),
            ErrorType::HttpRequestBuilderError
        );
    }
}
