//! Internal error types for transport operations.
//!
//! These errors stay inside `mcpdeck-http`; the client maps them to
//! `ApiError` at the port boundary.

use mcpdeck_core::ApiError;
use thiserror::Error;

/// Result type alias for transport operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors raised before an HTTP status could be interpreted.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API paths: {0}")]
    UnusableBaseUrl(String),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A header value could not be built from configuration.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Network(e) => Self::Network(e.to_string()),
            HttpError::JsonParse(e) => Self::InvalidResponse(e.to_string()),
            HttpError::InvalidUrl(_) | HttpError::UnusableBaseUrl(_) | HttpError::InvalidHeader(_) => {
                Self::Network(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_maps_to_invalid_response() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let api: ApiError = HttpError::from(json_err).into();
        assert!(matches!(api, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn test_url_error_maps_to_network() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let api: ApiError = HttpError::from(url_err).into();
        assert!(matches!(api, ApiError::Network(msg) if msg.contains("Invalid URL")));
    }
}
