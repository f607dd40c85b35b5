//! Transport error types

use thiserror::Error;

/// Errors raised while performing a remote call
#[derive(Error, Debug)]
pub enum TransportError {
    /// The remote API answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Network/HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Create a status error carrying the remote message verbatim
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// HTTP status code, when the remote side produced one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type TransportResult<T> = Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_is_verbatim() {
        let err = TransportError::status(404, "regulation 7 not found");
        assert_eq!(err.to_string(), "regulation 7 not found");
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_other_has_no_status() {
        let err = TransportError::Other("connection reset".into());
        assert_eq!(err.status_code(), None);
    }
}
