//! Errors returned by the HTTP client.
//!
//! A call either succeeds with a decoded payload or fails with exactly one
//! [`ClientError`]. The variants fall in three groups:
//!
//! - API errors, decoded from the response body: [`ClientError::Validation`]
//!   (400), [`ClientError::Authorization`] (403), [`ClientError::Service`] (503)
//! - Transport errors: [`ClientError::Http`], [`ClientError::ResponseBodyRead`],
//!   [`ClientError::UrlParse`], [`ClientError::InvalidBaseUrl`],
//!   [`ClientError::InvalidHeader`]
//! - Decode and protocol errors: [`ClientError::JsonDeserialization`],
//!   [`ClientError::HttpStatus`]
//!
//! Nothing is retried internally. [`ClientError::is_retryable`] tells callers
//! which failures are worth another attempt.

use http::StatusCode;
use pago46::{AuthorizationError, ServiceError, ValidationError};
use url::Url;

/// Errors that can occur while talking to the Pago46 API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the request content (HTTP 400).
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The server rejected the credentials or signature (HTTP 403).
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// The server is temporarily unavailable (HTTP 503).
    #[error(transparent)]
    Service(#[from] ServiceError),
    /// URL parse error.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// A signing header value is not a valid HTTP header value.
    #[error("Invalid header value: {context}: {source}")]
    InvalidHeader {
        /// Human-readable context.
        context: &'static str,
        /// The underlying header error.
        #[source]
        source: http::header::InvalidHeaderValue,
    },
    /// The base URL cannot have path segments appended (e.g. `mailto:`).
    #[error("Base URL cannot be a base: {0}")]
    InvalidBaseUrl(Url),
    /// HTTP transport error.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// Failed to read the response body.
    #[error("Failed to read response body: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The response body is not the expected JSON.
    #[error("Failed to deserialize JSON: {context}: {source}")]
    JsonDeserialization {
        /// Human-readable context.
        context: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// Unexpected HTTP status code.
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        /// Human-readable context.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body.
        body: String,
    },
}

impl ClientError {
    /// The HTTP status behind this error, when a response was received.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Validation(_) => Some(StatusCode::BAD_REQUEST),
            Self::Authorization(_) => Some(StatusCode::FORBIDDEN),
            Self::Service(_) => Some(StatusCode::SERVICE_UNAVAILABLE),
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Http { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Whether repeating the same call might succeed.
    ///
    /// True for [`Self::Service`] and for transport failures; false for
    /// anything the server deliberately rejected.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Service(_) | Self::Http { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pago46::ErrorItem;

    #[test]
    fn test_validation_error_is_transparent() {
        let err = ClientError::from(ValidationError {
            status: 400,
            message: "bad".into(),
            errors: vec![ErrorItem {
                field: "price".into(),
                message: "required".into(),
            }],
        });
        assert_eq!(err.to_string(), "invalid request, price:required");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_service_error_is_retryable() {
        let err = ClientError::from(ServiceError {
            status: 503,
            message: "down".into(),
        });
        assert!(err.is_retryable());
        assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[test]
    fn test_authorization_error_is_not_retryable() {
        let err = ClientError::from(AuthorizationError {
            status: 403,
            message: "bad signature".into(),
        });
        assert!(!err.is_retryable());
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    }

    #[test]
    fn test_decode_error_has_no_status() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ClientError::JsonDeserialization {
            context: "GET payment",
            source,
        };
        assert!(err.status().is_none());
        assert!(err.to_string().starts_with("Failed to deserialize JSON: GET payment"));
    }
}
