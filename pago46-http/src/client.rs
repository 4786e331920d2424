//! Top-level client.
//!
//! [`Client`] is a [`PaymentsService`] built from credentials and a
//! [`ClientConfig`]; it dereferences to the service, so payment calls are
//! made on the client directly.

use pago46::Credentials;
use std::ops::Deref;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::payments::PaymentsService;
use crate::transport::Transport;

/// A Pago46 API client.
#[derive(Clone, Debug)]
pub struct Client {
    payments: PaymentsService,
}

impl Client {
    /// Creates a client for the sandbox endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the default endpoint cannot be used.
    pub fn try_new(credentials: Credentials) -> Result<Self, ClientError> {
        Self::from_config(credentials, &ClientConfig::default())
    }

    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `config.base_url` cannot
    /// take a path.
    pub fn from_config(
        credentials: Credentials,
        config: &ClientConfig,
    ) -> Result<Self, ClientError> {
        let mut transport = Transport::try_new(config.base_url.clone(), credentials)?;
        if let Some(timeout) = config.timeout() {
            transport = transport.with_timeout(timeout);
        }
        Ok(Self::from_transport(transport, config))
    }

    /// Creates a client over a preconfigured transport (custom HTTP client,
    /// extra headers), taking only the variant from `config`.
    #[must_use]
    pub const fn from_transport(transport: Transport, config: &ClientConfig) -> Self {
        Self {
            payments: PaymentsService::new(transport, config.variant),
        }
    }

    /// The payments service.
    #[must_use]
    pub const fn payments(&self) -> &PaymentsService {
        &self.payments
    }
}

impl Deref for Client {
    type Target = PaymentsService;

    fn deref(&self) -> &Self::Target {
        &self.payments
    }
}
