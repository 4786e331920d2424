//! Client configuration.
//!
//! Credentials are deliberately not part of [`ClientConfig`]: they are always
//! passed in code. The rest can be embedded in a host application's own
//! configuration file.
//!
//! ```toml
//! base_url = "https://api.pago46.com"
//! variant = "merchant_orders"
//! timeout_ms = 10000
//! ```

use pago46::ApiVariant;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::constants::DEFAULT_BASE_URL;
use crate::error::ClientError;

/// Where and how a client connects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API endpoint (default: the sandbox, [`DEFAULT_BASE_URL`]).
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Which API shape to speak (default: [`ApiVariant::Payments`]).
    #[serde(default)]
    pub variant: ApiVariant,

    /// Per-request timeout in milliseconds. Unset means no timeout beyond
    /// what the underlying HTTP client applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            variant: ApiVariant::default(),
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for the given endpoint with default settings.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Selects the API variant.
    #[must_use]
    pub fn with_variant(mut self, variant: ApiVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// The per-request timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Parses a base URL string into a default configuration for that endpoint.
impl TryFrom<&str> for ClientConfig {
    type Error = ClientError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let url = Url::parse(value.trim()).map_err(|e| ClientError::UrlParse {
            context: "Failed to parse base url",
            source: e,
        })?;
        Ok(Self::new(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_sandbox() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "https://testapi.pago46.com/");
        assert_eq!(config.variant, ApiVariant::Payments);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"variant":"merchant_orders","timeout_ms":2500}"#).unwrap();
        assert_eq!(config.base_url, default_base_url());
        assert_eq!(config.variant, ApiVariant::MerchantOrders);
        assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_try_from_str() {
        let config = ClientConfig::try_from("https://api.example.com/v1/").unwrap();
        assert_eq!(config.base_url.path(), "/v1/");
        assert!(ClientConfig::try_from("not a url").is_err());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::default()
            .with_variant(ApiVariant::MerchantOrders)
            .with_timeout(Duration::from_secs(3));
        assert_eq!(config.timeout_ms, Some(3000));
        assert_eq!(config.variant, ApiVariant::MerchantOrders);
    }
}
