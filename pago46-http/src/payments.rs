//! The payments service.
//!
//! [`PaymentsService`] is the public surface of the SDK: fetch, list and
//! create payments, and look up the status change behind a notification
//! token. Paths, form field names and response keys follow the
//! [`ApiVariant`] chosen at construction.

use pago46::payment::NOTIFICATION_TOKEN_PARAM;
use pago46::{ApiVariant, FormValues, Payment, PaymentResponse, PaymentStatusChangeResponse};

#[cfg(feature = "telemetry")]
use tracing::{field::Empty, instrument};

use crate::decode::decode_json;
use crate::error::ClientError;
use crate::transport::Transport;

/// Payment operations against one API endpoint.
#[derive(Clone, Debug)]
pub struct PaymentsService {
    transport: Transport,
    variant: ApiVariant,
}

impl PaymentsService {
    /// Creates a service speaking `variant` over `transport`.
    #[must_use]
    pub const fn new(transport: Transport, variant: ApiVariant) -> Self {
        Self { transport, variant }
    }

    /// The API variant this service speaks.
    #[must_use]
    pub const fn variant(&self) -> ApiVariant {
        self.variant
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &Transport {
        &self.transport
    }

    /// The public merchant key (or receiver id) requests are signed with.
    #[must_use]
    pub fn merchant_key(&self) -> &str {
        self.transport.credentials().key()
    }

    /// Fetches a single payment by id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the API answers with an
    /// error status, or the body does not decode.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "pago46.payments.payment",
            skip(self),
            fields(otel.status_code = Empty, error.message = Empty)
        )
    )]
    pub async fn payment(&self, id: &str) -> Result<PaymentResponse, ClientError> {
        const CONTEXT: &str = "GET payment";
        let mut path = self.variant.resource_segments().to_vec();
        path.push(id);
        let response = self.transport.get(&path, None, CONTEXT).await?;
        decode_json(response, CONTEXT).await
    }

    /// Lists payments.
    ///
    /// An empty collection, or a `null` body, yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the API answers with an
    /// error status, or the body does not decode.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "pago46.payments.payments",
            skip_all,
            fields(otel.status_code = Empty, error.message = Empty)
        )
    )]
    pub async fn payments(&self) -> Result<Vec<PaymentResponse>, ClientError> {
        const CONTEXT: &str = "GET payments";
        let response = self
            .transport
            .get(self.variant.collection_segments(), None, CONTEXT)
            .await?;
        let payments: Option<Vec<PaymentResponse>> = decode_json(response, CONTEXT).await?;
        Ok(payments.unwrap_or_default())
    }

    /// Creates a payment. The response carries the URL to send the payer to.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the API rejects a field, and any
    /// other [`ClientError`] on transport or decode failure.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "pago46.payments.create_payment",
            skip_all,
            fields(
                merchant_order_id = %payment.merchant_order_id,
                otel.status_code = Empty,
                error.message = Empty
            )
        )
    )]
    pub async fn create_payment(&self, payment: &Payment) -> Result<PaymentResponse, ClientError> {
        const CONTEXT: &str = "POST payment";
        let form = payment.params(self.variant);
        let response = self
            .transport
            .post_form(self.variant.collection_segments(), &form, CONTEXT)
            .await?;
        decode_json(response, CONTEXT).await
    }

    /// Looks up the status change identified by a notification token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the API answers with an
    /// error status, or the body does not decode.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "pago46.payments.payment_status",
            skip_all,
            fields(otel.status_code = Empty, error.message = Empty)
        )
    )]
    pub async fn payment_status(
        &self,
        notification_token: &str,
    ) -> Result<PaymentStatusChangeResponse, ClientError> {
        const CONTEXT: &str = "GET payment status";
        let values = FormValues::new().with(NOTIFICATION_TOKEN_PARAM, notification_token);
        let response = self
            .transport
            .get(self.variant.collection_segments(), Some(&values), CONTEXT)
            .await?;
        decode_json(response, CONTEXT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pago46::{Credentials, Price};
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(server: &MockServer, variant: ApiVariant) -> PaymentsService {
        let transport = Transport::try_new(
            server.uri().parse::<Url>().unwrap(),
            Credentials::new("merchant-key", "merchant-secret"),
        )
        .unwrap();
        PaymentsService::new(transport, variant)
    }

    #[tokio::test]
    async fn test_create_payment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/payments"))
            .and(body_string_contains("currency=CLP"))
            .and(body_string_contains("price=5000"))
            .and(body_string_contains("merchant_order_id=ord-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "abc",
                "status": "pending",
                "redirectURL": "https://pay/abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let payments = service(&server, ApiVariant::Payments);
        let created = payments
            .create_payment(&Payment::new("CLP", 5000_u64, "ord-1"))
            .await
            .unwrap();
        assert_eq!(created.id, "abc");
        assert_eq!(created.status, "pending");
        assert_eq!(created.redirect_url, "https://pay/abc");
    }

    #[tokio::test]
    async fn test_create_payment_validation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/payments"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "status": 400,
                "message": "bad",
                "errors": [{"Field": "price", "Message": "required"}]
            })))
            .mount(&server)
            .await;

        let payments = service(&server, ApiVariant::Payments);
        let err = payments
            .create_payment(&Payment::new("CLP", 0_u64, "ord-1"))
            .await
            .unwrap_err();
        match err {
            ClientError::Validation(validation) => {
                assert_eq!(validation.errors[0].field, "price");
                assert_eq!(validation.errors[0].message, "required");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_payment_by_id_with_string_price() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payments/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "abc",
                "price": "1000.50",
                "status": "successful"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let payment = service(&server, ApiVariant::Payments)
            .payment("abc")
            .await
            .unwrap();
        assert_eq!(payment.id, "abc");
        assert_eq!(payment.price, Some(Price::new(1000.50)));
        assert_eq!(payment.status, "successful");
    }

    #[tokio::test]
    async fn test_payment_503_never_decodes_as_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payments/abc"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "status": 503,
                "message": "maintenance",
                "id": "abc",
                "status_text": "pending",
                "redirectURL": "https://pay/abc"
            })))
            .mount(&server)
            .await;

        let err = service(&server, ApiVariant::Payments)
            .payment("abc")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Service(_)));
    }

    #[tokio::test]
    async fn test_payment_malformed_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = service(&server, ApiVariant::Payments)
            .payment("abc")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::JsonDeserialization {
                context: "GET payment",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_payments_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "a", "price": 100},
                {"id": "b", "price": "200.25"}
            ])))
            .mount(&server)
            .await;

        let list = service(&server, ApiVariant::Payments)
            .payments()
            .await
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "a");
        assert_eq!(list[1].price, Some(Price::new(200.25)));
    }

    #[tokio::test]
    async fn test_payments_empty_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payments"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let list = service(&server, ApiVariant::Payments)
            .payments()
            .await
            .unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_payments_null_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payments"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let list = service(&server, ApiVariant::Payments)
            .payments()
            .await
            .unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_payment_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payments"))
            .and(query_param("notification_token", "tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let status = service(&server, ApiVariant::Payments)
            .payment_status("tok-1")
            .await
            .unwrap();
        assert_eq!(status.result, "ok");
    }

    #[tokio::test]
    async fn test_merchant_orders_variant_paths_and_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/merchant/orders/"))
            .and(body_string_contains("merchantInvoiceID=inv-1"))
            .and(body_string_contains("amount=5000.00"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transactionID": "tx-1",
                "transactionTimeDateStamp": "2024-05-01T12:00:00Z",
                "redirectURL": "https://pay/tx-1"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/merchant/order/tx-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transactionID": "tx-1",
                "redirectURL": "https://pay/tx-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let orders = service(&server, ApiVariant::MerchantOrders);
        assert_eq!(orders.variant(), ApiVariant::MerchantOrders);
        let created = orders
            .create_payment(&Payment::new("CLP", 5000_u64, "inv-1"))
            .await
            .unwrap();
        assert_eq!(created.id, "tx-1");
        assert!(created.creation_date.is_some());

        let fetched = orders.payment(&created.id).await.unwrap();
        assert_eq!(fetched.redirect_url, "https://pay/tx-1");
    }

    #[test]
    fn test_merchant_key() {
        let transport = Transport::try_new(
            "https://api.example.com".parse().unwrap(),
            Credentials::receiver(4601, "secret"),
        )
        .unwrap();
        let payments = PaymentsService::new(transport, ApiVariant::MerchantOrders);
        assert_eq!(payments.merchant_key(), "4601");
    }
}
