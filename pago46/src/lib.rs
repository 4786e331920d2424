#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Pago46 payments API.
//!
//! This crate holds everything that does not touch the network: the request
//! signing protocol, form encoding, the payment wire types and the error
//! bodies the API returns. The HTTP transport and the payments service live in
//! `pago46-http`.
//!
//! # Request signing
//!
//! Every request carries an HMAC-SHA256 signature over a canonical string
//! built from the merchant key, a millisecond timestamp, the HTTP method, the
//! request path and (when present) the form values:
//!
//! ```text
//! key & timestamp & escape(method) & escape(path) [& encode(values)]
//! ```
//!
//! # Modules
//!
//! - [`credentials`] - Merchant key and signing secret
//! - [`error`] - Error bodies returned by the API (400, 403, 503)
//! - [`form`] - Form values and the encoding the server reconstructs
//! - [`payment`] - Payment requests, responses and notifications
//! - [`price`] - Request amounts and the string-or-number response price
//! - [`signature`] - Canonical string construction and HMAC signing
//! - [`timestamp`] - Millisecond timestamps sent with each request

pub mod credentials;
pub mod error;
pub mod form;
pub mod payment;
pub mod price;
pub mod signature;
pub mod timestamp;

pub use credentials::Credentials;
pub use error::{AuthorizationError, ErrorItem, ServiceError, ValidationError};
pub use form::FormValues;
pub use payment::{
    ApiVariant, Payment, PaymentResponse, PaymentStatusChangeRequest,
    PaymentStatusChangeResponse,
};
pub use price::{Amount, Price, PriceParseError};
pub use signature::{Signature, Signer};
pub use timestamp::MillisTimestamp;
