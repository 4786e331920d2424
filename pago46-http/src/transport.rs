//! Signed HTTP transport.
//!
//! [`Transport`] turns a path and optional form values into a signed request
//! against its base URL, sends it and classifies the response before anyone
//! tries to read a success payload from it:
//!
//! | status | outcome |
//! |---|---|
//! | 2xx | the response, for the caller to decode |
//! | 400 | [`ClientError::Validation`] |
//! | 403 | [`ClientError::Authorization`] |
//! | 503 | [`ClientError::Service`] |
//! | other | [`ClientError::HttpStatus`] |
//!
//! Every request carries `Content-Type`, `merchant-key`, `message-hash` and
//! `message-date`, overriding any custom header of the same name. GET and
//! DELETE send their values in the query string, POST sends them as the form
//! body; either way the same values are signed. The signed path is the
//! decoded URL path.

use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, Method, StatusCode};
use pago46::{
    AuthorizationError, Credentials, FormValues, ServiceError, Signature, Signer,
    ValidationError,
};
use percent_encoding::percent_decode_str;
use reqwest::{Client, Response};
use std::fmt::Display;
use std::time::Duration;
use url::Url;

use crate::constants::{
    FORM_CONTENT_TYPE, MERCHANT_KEY_HEADER, MESSAGE_DATE_HEADER, MESSAGE_HASH_HEADER,
};
use crate::decode::decode_json;
use crate::error::ClientError;

#[cfg(feature = "telemetry")]
use tracing::Span;

/// Sends signed requests to one API endpoint.
#[derive(Clone, Debug)]
pub struct Transport {
    /// Endpoint all paths are appended to
    base_url: Url,
    /// Shared Reqwest HTTP client
    client: Client,
    /// Signs each request with the merchant credentials
    signer: Signer,
    /// Extra headers sent with each request
    headers: HeaderMap,
    /// Optional request timeout
    timeout: Option<Duration>,
}

impl Transport {
    /// Constructs a new [`Transport`] for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if paths cannot be appended to
    /// `base_url`.
    pub fn try_new(base_url: Url, credentials: Credentials) -> Result<Self, ClientError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }
        Ok(Self {
            base_url,
            client: Client::new(),
            signer: Signer::new(credentials),
            headers: HeaderMap::new(),
            timeout: None,
        })
    }

    /// Replaces the underlying HTTP client, e.g. to share a connection pool.
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Attaches extra headers to all future requests.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets a timeout for all future requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the base URL used by this transport.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the credentials requests are signed with.
    pub const fn credentials(&self) -> &Credentials {
        self.signer.credentials()
    }

    /// Returns any custom headers configured on the transport.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the configured timeout, if any.
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Resolves path segments against the base URL.
    ///
    /// Each segment is percent-encoded on its own, so an id containing `/`
    /// stays one segment. A trailing empty segment yields a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if the base URL cannot take a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a signed `GET`, with `values` in the query string.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    ///
    /// # Panics
    ///
    /// Panics if the system clock reads before the Unix epoch.
    pub async fn get(
        &self,
        path: &[&str],
        values: Option<&FormValues>,
        context: &'static str,
    ) -> Result<Response, ClientError> {
        self.send(Method::GET, path, values, context).await
    }

    /// Sends a signed `DELETE`, with `values` in the query string.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    ///
    /// # Panics
    ///
    /// Panics if the system clock reads before the Unix epoch.
    pub async fn delete(
        &self,
        path: &[&str],
        values: Option<&FormValues>,
        context: &'static str,
    ) -> Result<Response, ClientError> {
        self.send(Method::DELETE, path, values, context).await
    }

    /// Sends a signed `POST` with `values` as the form-encoded body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    ///
    /// # Panics
    ///
    /// Panics if the system clock reads before the Unix epoch.
    pub async fn post_form(
        &self,
        path: &[&str],
        values: &FormValues,
        context: &'static str,
    ) -> Result<Response, ClientError> {
        self.send(Method::POST, path, Some(values), context).await
    }

    async fn send(
        &self,
        method: Method,
        path: &[&str],
        values: Option<&FormValues>,
        context: &'static str,
    ) -> Result<Response, ClientError> {
        let result = self.dispatch(method, path, values, context).await;
        record_result_on_span(&result);
        result
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &[&str],
        values: Option<&FormValues>,
        context: &'static str,
    ) -> Result<Response, ClientError> {
        let mut url = self.endpoint(path)?;
        let values = values.filter(|v| !v.is_empty());
        // Signed path is decoded and excludes the query string.
        let signed_path = percent_decode_str(url.path()).decode_utf8_lossy().into_owned();
        let signature = self.signer.sign(method.as_str(), &signed_path, values);
        let headers = self.request_headers(&signature, context)?;

        let body = if method == Method::POST {
            values.map(FormValues::encode)
        } else {
            if let Some(values) = values {
                url.set_query(Some(&values.encode()));
            }
            None
        };

        let mut req = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ClientError::Http { context, source: e })?;
        classify(response, context).await
    }

    /// Custom headers with the content type and signing headers inserted over them.
    fn request_headers(
        &self,
        signature: &Signature,
        context: &'static str,
    ) -> Result<HeaderMap, ClientError> {
        let value = |v: &str| {
            HeaderValue::from_str(v).map_err(|e| ClientError::InvalidHeader { context, source: e })
        };
        let mut headers = self.headers.clone();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        headers.insert(
            HeaderName::from_static(MERCHANT_KEY_HEADER),
            value(self.signer.credentials().key())?,
        );
        headers.insert(
            HeaderName::from_static(MESSAGE_HASH_HEADER),
            value(signature.hash())?,
        );
        headers.insert(
            HeaderName::from_static(MESSAGE_DATE_HEADER),
            value(&signature.timestamp().to_string())?,
        );
        Ok(headers)
    }
}

/// Maps error statuses to typed errors; passes 2xx responses through.
async fn classify(response: Response, context: &'static str) -> Result<Response, ClientError> {
    let status = response.status();
    match status {
        StatusCode::BAD_REQUEST => {
            let mut err: ValidationError = decode_json(response, context).await?;
            if err.status == 0 {
                err.status = status.as_u16();
            }
            Err(err.into())
        }
        StatusCode::FORBIDDEN => {
            let mut err: AuthorizationError = decode_json(response, context).await?;
            if err.status == 0 {
                err.status = status.as_u16();
            }
            Err(err.into())
        }
        StatusCode::SERVICE_UNAVAILABLE => {
            let mut err: ServiceError = decode_json(response, context).await?;
            if err.status == 0 {
                err.status = status.as_u16();
            }
            Err(err.into())
        }
        s if s.is_success() => Ok(response),
        _ => {
            let body = response
                .text()
                .await
                .map_err(|e| ClientError::ResponseBodyRead { context, source: e })?;
            Err(ClientError::HttpStatus {
                context,
                status,
                body,
            })
        }
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to Pago46 failed");
        }
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}
