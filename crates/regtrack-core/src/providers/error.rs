//! Provider error types

use thiserror::Error;

/// Failures of a completion request
///
/// These are the only errors that end an agent run; tool failures are fed
/// back to the model instead.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} API error ({status}): {message}")]
    ApiError {
        provider: String,
        status: u16,
        message: String,
    },

    /// The stream closed without an end event
    #[error("Stream ended unexpectedly")]
    StreamEnded,
}

impl ProviderError {
    pub fn api_error(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
