//! HTTP transport and payments service for the Pago46 payments API.
//!
//! Builds signed requests with [`pago46::Signer`], sends them with `reqwest`,
//! turns the API's error statuses into typed errors and decodes the payment
//! types from [`pago46::payment`].
//!
//! # Modules
//!
//! - [`constants`] — Header names, content type, default base URL
//! - [`error`] — The error taxonomy every call returns (feature: `client`)
//! - [`config`] — Client configuration (feature: `client`)
//! - [`transport`] — Signed GET/DELETE/POST and status classification (feature: `client`)
//! - [`decode`] — JSON body decoding (feature: `client`)
//! - [`payments`] — The payments service (feature: `client`)
//! - [`client`] — Top-level client (feature: `client`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pago46::{Credentials, Payment};
//! use pago46_http::client::Client;
//!
//! # async fn run() -> Result<(), pago46_http::error::ClientError> {
//! let client = Client::try_new(Credentials::new("merchant-key", "merchant-secret"))?;
//! let created = client
//!     .create_payment(&Payment::new("CLP", 5000_u64, "ord-1"))
//!     .await?;
//! let _redirect_to = created.redirect_url;
//! # Ok(())
//! # }
//! ```
//!
//! # Feature Flags
//!
//! - `client` (default) - The HTTP client
//! - `telemetry` - Enables tracing instrumentation

pub mod constants;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod config;
#[cfg(feature = "client")]
pub mod decode;
#[cfg(feature = "client")]
pub mod error;
#[cfg(feature = "client")]
pub mod payments;
#[cfg(feature = "client")]
pub mod transport;
