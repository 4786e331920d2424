//! JSON response decoding.

use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Reads the whole body of `response` and decodes it as JSON.
///
/// The response is consumed, so its connection is released whether the body
/// decodes or not.
///
/// # Errors
///
/// Returns [`ClientError::ResponseBodyRead`] if the body cannot be read and
/// [`ClientError::JsonDeserialization`] if it is not valid JSON for `R`.
pub async fn decode_json<R>(response: Response, context: &'static str) -> Result<R, ClientError>
where
    R: DeserializeOwned,
{
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClientError::ResponseBodyRead { context, source: e })?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::JsonDeserialization { context, source: e })
}
