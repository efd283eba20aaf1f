//! Remote mii lookup service
//!
//! Two requests exist: look up the mii of an account by its identifier,
//! and ask the service for a randomized mii. Both answer with a JSON
//! envelope whose `data` field is the encoded record as base64 text;
//! decoding and validating that payload is the workflow's job, the
//! client only moves bytes.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Default service endpoint
pub const DEFAULT_BASE_URL: &str = "https://mii-unsecure.ariankordi.net";

/// Remote fetch failure: transport error or non-success response. The
/// payload is the response body (or error) text, surfaced verbatim to
/// the user.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote fetch failed: {0}")]
    Fetch(String),
}

impl RemoteError {
    /// The text to show the user
    pub fn text(&self) -> &str {
        match self {
            RemoteError::Fetch(text) => text,
        }
    }
}

/// Source of encoded mii payloads. Both calls suspend until response or
/// failure; there is no cancellation of an in-flight request.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Look up the mii of the given account. The identifier is
    /// guaranteed non-empty by the workflow.
    async fn fetch_by_account(&self, account: &str) -> Result<String, RemoteError>;

    /// Ask the service for a randomized mii.
    async fn fetch_random(&self) -> Result<String, RemoteError>;
}

/// Response envelope of both service endpoints
#[derive(Debug, Deserialize)]
struct MiiPayload {
    data: String,
}

/// HTTP client for the mii lookup service.
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        RemoteClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn request_payload(&self, url: String) -> Result<String, RemoteError> {
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| RemoteError::Fetch(e.to_string()))?;
            return Err(RemoteError::Fetch(body));
        }

        let payload: MiiPayload = response
            .json()
            .await
            .map_err(|e| RemoteError::Fetch(e.to_string()))?;
        Ok(payload.data)
    }
}

impl Default for RemoteClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteSource for RemoteClient {
    async fn fetch_by_account(&self, account: &str) -> Result<String, RemoteError> {
        let url = format!("{}/mii_data/{}?api_id=1", self.base_url, account);
        self.request_payload(url).await
    }

    async fn fetch_random(&self) -> Result<String, RemoteError> {
        let url = format!("{}/mii_data_random", self.base_url);
        self.request_payload(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_carries_exact_text() {
        let err = RemoteError::Fetch("user not found".to_string());
        assert_eq!(err.text(), "user not found");
        assert_eq!(err.to_string(), "remote fetch failed: user not found");
    }

    #[test]
    fn test_payload_envelope_shape() {
        let payload: MiiPayload =
            serde_json::from_str(r#"{"data":"QUJD","images":{}}"#).unwrap();
        assert_eq!(payload.data, "QUJD");
    }
}
