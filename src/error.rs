//! Error types for the dashboard client.
//!
//! The taxonomy mirrors where a failure arises:
//! - Validation: rejected client-side, before any network call
//! - Network: the request never reached or returned from the backend
//! - Server: the backend was reached but responded with failure
//! - NotFound: the requested record does not exist
//!
//! None of these are retried automatically anywhere in this layer; the user
//! decides whether to try again.

use serde::Serialize;

use crate::api::ApiError;

/// Serializable error representation for IPC.
///
/// Commands return this so the webview can branch on `kind` (e.g. render a
/// "not found" state instead of a crash) and show `message` to the user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiError {
    pub message: String,
    pub kind: ErrorKind,
    pub can_retry: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Validation,
    Network,
    Server,
    NotFound,
}

impl UiError {
    pub fn validation(message: impl Into<String>) -> Self {
        UiError {
            message: message.into(),
            kind: ErrorKind::Validation,
            can_retry: false,
        }
    }

    /// Internal state mismatch (e.g. lock poisoned, unknown session id).
    /// Surfaced as a non-retryable server-side failure.
    pub fn internal(message: impl Into<String>) -> Self {
        UiError {
            message: message.into(),
            kind: ErrorKind::Server,
            can_retry: false,
        }
    }
}

impl From<ApiError> for UiError {
    fn from(err: ApiError) -> Self {
        let kind = match &err {
            ApiError::Http(_) | ApiError::Io(_) => ErrorKind::Network,
            ApiError::Api { .. } | ApiError::Json(_) => ErrorKind::Server,
            ApiError::NotFound(_) => ErrorKind::NotFound,
        };
        UiError {
            message: err.to_string(),
            kind,
            // Transport failures are worth a manual retry; a 4xx/5xx or a
            // missing record generally is not.
            can_retry: kind == ErrorKind::Network,
        }
    }
}
