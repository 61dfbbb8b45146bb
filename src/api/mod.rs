//! REST client for the call-intelligence backend.
//!
//! The sole process boundary in this layer. All JSON crosses here:
//! - calls: upload, list, fetch-one, patch-tags, export-link
//! - analytics: aggregate snapshot
//!
//! Failure policy is per-operation (see `calls.rs`): the list fetch degrades
//! to an empty sequence so the dashboard shell always renders, everything
//! else propagates to the caller. No operation is retried automatically.

pub mod analytics;
pub mod calls;

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::Config;

/// Per-request timeout. Uploads carry whole audio files, so this is generous.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request never reached or returned from the backend.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
    /// Backend reached, responded with a non-success status.
    #[error("Server error {status}: {message}")]
    Api { status: u16, message: String },
    /// Requested record does not exist.
    #[error("Call {0} not found")]
    NotFound(i64),
    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),
    /// Local file read failed before the request was built.
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        ApiClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Deserialize a successful response body, or map the failure status to an
/// [`ApiError::Api`] carrying the backend's message.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/calls"), "http://localhost:8000/calls");
    }
}
