use thiserror::Error;

use gatepass_core::EnvelopeError;

use crate::store::StoreError;

/// Client error taxonomy. Only 401 is interpreted by this layer; every
/// other error status is passed through as [`ApiError::Api`] for the
/// caller to handle.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response received; never retried by this layer.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-401 error status, message taken from the envelope when present.
    #[error("server error {status}: {message}")]
    Api { status: u16, message: String },

    /// 401 on an auth endpoint or on an already-retried request.
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// Refresh token missing, or the refresh call failed or timed out.
    /// Stored credentials have been cleared by the time this is returned.
    #[error("session expired: {0}; log in again")]
    SessionExpired(String),

    /// Response body did not match the canonical `{success, data, message}`
    /// envelope.
    #[error("malformed response envelope: {0}")]
    Envelope(String),

    /// Server answered success=false.
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("credential store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ApiError {
    pub(crate) fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            Self::Unauthorized(message)
        } else {
            Self::Api {
                status: status.as_u16(),
                message,
            }
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired(_))
    }
}

impl From<EnvelopeError> for ApiError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Rejected(message) => Self::Rejected(message),
            EnvelopeError::MissingData => Self::Envelope(err.to_string()),
        }
    }
}
