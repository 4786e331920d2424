//! Payment wire types.
//!
//! The API exists in two flavours that disagree on paths, form field names
//! and response keys. [`ApiVariant`] picks one at construction time; the
//! request and response types below are shared and adapt to it.
//!
//! | | [`ApiVariant::Payments`] | [`ApiVariant::MerchantOrders`] |
//! |---|---|---|
//! | collection | `/payments` | `/merchant/orders/` |
//! | single | `/payments/{id}` | `/merchant/order/{id}` |
//! | response id key | `id` | `transactionID` |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

use crate::form::FormValues;
use crate::price::{Amount, Price};

/// Query parameter carrying a notification token on status lookups.
pub const NOTIFICATION_TOKEN_PARAM: &str = "notification_token";

/// Which upstream API shape a client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiVariant {
    /// The `/payments` API, keyed by merchant key.
    #[default]
    Payments,
    /// The `/merchant/orders/` API, keyed by receiver id.
    MerchantOrders,
}

impl ApiVariant {
    /// Path segments of the payment collection.
    ///
    /// A trailing empty segment produces a trailing slash.
    #[must_use]
    pub const fn collection_segments(self) -> &'static [&'static str] {
        match self {
            Self::Payments => &["payments"],
            Self::MerchantOrders => &["merchant", "orders", ""],
        }
    }

    /// Path segments preceding a payment id.
    #[must_use]
    pub const fn resource_segments(self) -> &'static [&'static str] {
        match self {
            Self::Payments => &["payments"],
            Self::MerchantOrders => &["merchant", "order"],
        }
    }
}

/// A payment to be created.
///
/// No validation happens client-side; the server reports bad fields as a
/// [`ValidationError`](crate::ValidationError).
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    /// ISO 4217 currency code (e.g. `"CLP"`).
    pub currency: String,
    /// Free-text description shown to the payer.
    pub description: String,
    /// The merchant's own order reference.
    pub merchant_order_id: String,
    /// URL the provider notifies on status changes.
    pub notify_url: String,
    /// Amount to charge.
    pub price: Amount,
    /// URL the payer is sent back to when done.
    pub return_url: String,
    /// Seconds the payment stays open.
    pub timeout: u32,
    /// Merchant-side creation time; only sent by [`ApiVariant::MerchantOrders`].
    pub transaction_time: Option<DateTime<Utc>>,
}

impl Payment {
    /// Creates a payment with the three fields every request needs.
    #[must_use]
    pub fn new(
        currency: impl Into<String>,
        price: impl Into<Amount>,
        merchant_order_id: impl Into<String>,
    ) -> Self {
        Self {
            currency: currency.into(),
            description: String::new(),
            merchant_order_id: merchant_order_id.into(),
            notify_url: String::new(),
            price: price.into(),
            return_url: String::new(),
            timeout: 0,
            transaction_time: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the notification URL.
    #[must_use]
    pub fn with_notify_url(mut self, url: impl Into<String>) -> Self {
        self.notify_url = url.into();
        self
    }

    /// Sets the return URL.
    #[must_use]
    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = url.into();
        self
    }

    /// Sets the timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: u32) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the merchant-side transaction time.
    #[must_use]
    pub const fn with_transaction_time(mut self, time: DateTime<Utc>) -> Self {
        self.transaction_time = Some(time);
        self
    }

    /// Form fields for a create request, named as `variant` expects.
    #[must_use]
    pub fn params(&self, variant: ApiVariant) -> FormValues {
        match variant {
            ApiVariant::Payments => FormValues::new()
                .with("currency", &self.currency)
                .with("description", &self.description)
                .with("merchant_order_id", &self.merchant_order_id)
                .with("notify_url", &self.notify_url)
                .with("price", self.price.to_string())
                .with("return_url", &self.return_url)
                .with("timeout", self.timeout.to_string()),
            ApiVariant::MerchantOrders => {
                let mut form = FormValues::new()
                    .with("merchantInvoiceID", &self.merchant_order_id)
                    .with("amount", self.price.to_decimal_string())
                    .with("currencyType", &self.currency)
                    .with("description", &self.description)
                    .with("postbackURL", &self.notify_url)
                    .with("returnURL", &self.return_url)
                    .with("timeout", self.timeout.to_string());
                if let Some(time) = self.transaction_time {
                    form.set("transactionsTimeDateStamp", time.to_rfc3339());
                }
                form
            }
        }
    }
}

/// A payment as reported by the API.
///
/// Decodes from either variant's JSON. Keys missing from the body leave the
/// field at its default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "PaymentResponseWire")]
pub struct PaymentResponse {
    /// Provider-side payment id (`id` or `transactionID`).
    pub id: String,
    /// Merchant the payment belongs to.
    pub merchant_id: String,
    /// The merchant's own order reference.
    pub merchant_order_id: String,
    /// Amount, if reported.
    pub price: Option<Price>,
    /// Description shown to the payer.
    pub description: String,
    /// Provider status (e.g. `"pending"`, `"successful"`).
    pub status: String,
    /// When the payment was created.
    pub creation_date: Option<DateTime<Utc>>,
    /// Where to send the payer to complete the payment.
    pub redirect_url: String,
    /// Seconds the payment stays open.
    pub timeout: Option<u64>,
}

/// The JSON shape of both variants, before it is folded into [`PaymentResponse`].
#[serde_as]
#[derive(Deserialize)]
struct PaymentResponseWire {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "transactionID")]
    id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "merchant_id")]
    merchant: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "merchantInvoiceID")]
    merchant_order_id: String,
    #[serde(default, alias = "amount")]
    price: Option<Price>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    description: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    status: String,
    #[serde(default, alias = "transactionTimeDateStamp")]
    creation_date: Option<DateTime<Utc>>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, rename = "redirectURL", alias = "redirect_url")]
    redirect_url: String,
    #[serde(default)]
    timeout: Option<u64>,
}

impl From<PaymentResponseWire> for PaymentResponse {
    fn from(wire: PaymentResponseWire) -> Self {
        Self {
            id: wire.id,
            merchant_id: wire.merchant,
            merchant_order_id: wire.merchant_order_id,
            price: wire.price,
            description: wire.description,
            status: wire.status,
            creation_date: wire.creation_date,
            redirect_url: wire.redirect_url,
            timeout: wire.timeout,
        }
    }
}

/// The notification the provider posts to a payment's notify URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatusChangeRequest {
    /// When the status change happened.
    #[serde(rename = "notificationTimeStamp")]
    pub notification_timestamp: DateTime<Utc>,
    /// Token to pass to a status lookup.
    #[serde(rename = "notificationID")]
    pub notification_id: String,
}

/// Acknowledgement of a status lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatusChangeResponse {
    /// Outcome reported by the provider.
    #[serde(default)]
    pub result: String,
}
