//! Error bodies returned by the Pago46 API.
//!
//! The API answers failed requests with a JSON body whose shape depends on
//! the status code. Each shape has its own type so callers can branch on it:
//!
//! - `400 Bad Request` → [`ValidationError`], with per-field details
//! - `403 Forbidden` → [`AuthorizationError`]
//! - `503 Service Unavailable` → [`ServiceError`]

use serde::{Deserialize, Serialize};
use std::fmt;

/// One rejected field of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorItem {
    /// Name of the offending form field.
    #[serde(rename = "Field", alias = "field")]
    pub field: String,
    /// Why the server rejected it.
    #[serde(rename = "Message", alias = "message")]
    pub message: String,
}

/// The request was well-formed HTTP but its content was rejected (HTTP 400).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// HTTP status reported by the server.
    #[serde(default)]
    pub status: u16,
    /// Summary message.
    #[serde(default)]
    pub message: String,
    /// Field-level details.
    #[serde(default)]
    pub errors: Vec<ErrorItem>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid request")?;
        if self.errors.is_empty() && !self.message.is_empty() {
            write!(f, ", {}", self.message)?;
        }
        for item in &self.errors {
            write!(f, ", {}:{}", item.field, item.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The merchant key or signature was not accepted (HTTP 403).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationError {
    /// HTTP status reported by the server.
    #[serde(default)]
    pub status: u16,
    /// Reason given by the server.
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for AuthorizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unauthorized request, {}", self.message)
    }
}

impl std::error::Error for AuthorizationError {}

/// The API is temporarily unavailable (HTTP 503).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    /// HTTP status reported by the server.
    #[serde(default)]
    pub status: u16,
    /// Reason given by the server.
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "service unavailable, {}", self.message)
    }
}

impl std::error::Error for ServiceError {}
