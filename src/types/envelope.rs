//! Kraken response envelope.
//!
//! Every Kraken REST response is wrapped as `{"error": [...], "result": ...}` and
//! Kraken answers with HTTP 200 even when `error` is populated. The dispatcher never
//! looks inside; callers that want the payload typed use [`read_envelope`].

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, KrakenError};

/// Raw response wrapper for Kraken API responses.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub error: Vec<String>,
    pub result: Option<T>,
}

impl<T> Envelope<T> {
    /// Turn the envelope into its result, or the first Kraken error it carries.
    pub fn into_result(self) -> Result<T, KrakenError> {
        if let Some(api_error) = ApiError::from_error_array(&self.error) {
            return Err(KrakenError::Api(api_error));
        }
        self.result
            .ok_or_else(|| KrakenError::InvalidResponse("Response missing 'result' field".to_string()))
    }
}

/// Read a response body and unwrap the Kraken envelope inside it.
pub async fn read_envelope<T>(response: reqwest::Response) -> Result<T, KrakenError>
where
    T: DeserializeOwned,
{
    let body = response.text().await?;
    let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
        KrakenError::InvalidResponse(format!("Failed to parse response: {}. Body: {}", e, body))
    })?;
    envelope.into_result()
}
