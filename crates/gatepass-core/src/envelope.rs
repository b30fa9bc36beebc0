use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical response envelope. Every endpoint wraps its payload as
/// `{success, data, message}`; anything else is a decode error, never
/// probed for alternative layouts.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    // no `default` attribute: it would put a `T: Default` bound on the derive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("success envelope is missing its data payload")]
    MissingData,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap a success envelope into its payload.
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Rejected(
                self.message
                    .unwrap_or_else(|| "no message provided".to_string()),
            ));
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }

    /// Acknowledge a success envelope whose payload does not matter
    /// (logout, deletes).
    pub fn ack(self) -> Result<(), EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Rejected(
                self.message
                    .unwrap_or_else(|| "no message provided".to_string()),
            ));
        }
        Ok(())
    }
}
