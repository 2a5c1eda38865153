//! Error handling module for the booking client.
//!
//! Every failure a page can hit is folded into [`ClientError`], which always
//! renders to a user-facing string.

use thiserror::Error;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const REQUEST_FAILED: &str = "REQUEST_FAILED";
    pub const REJECTED: &str = "REJECTED";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
}

/// Client error type.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Transport(String),
    /// 401 or 403 from the API
    #[error("Auth error ({status}). Please login.")]
    Auth { status: u16, body: String },
    /// Any other non-2xx response
    #[error("Request failed: {status} {reason} - {body}")]
    Request {
        status: u16,
        reason: String,
        body: String,
    },
    /// Auth endpoints reply with a `message` field that is shown verbatim
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// Malformed or unexpected body
    #[error("Parse error: {0}")]
    Parse(String),
    /// Token store could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),
    /// Client-side form validation
    #[error("{0}")]
    Validation(String),
}

impl ClientError {
    /// HTTP status carried by the error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Auth { status, .. }
            | ClientError::Request { status, .. }
            | ClientError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Transport(_) => codes::TRANSPORT_ERROR,
            ClientError::Auth { .. } => codes::UNAUTHORIZED,
            ClientError::Request { .. } => codes::REQUEST_FAILED,
            ClientError::Rejected { .. } => codes::REJECTED,
            ClientError::Parse(_) => codes::PARSE_ERROR,
            ClientError::Storage(_) => codes::STORAGE_ERROR,
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
        }
    }

    /// The server-supplied text when there is any, otherwise the display form.
    pub fn detail(&self) -> String {
        match self {
            ClientError::Auth { body, .. } | ClientError::Request { body, .. }
                if !body.trim().is_empty() =>
            {
                body.clone()
            }
            ClientError::Request { reason, .. } if !reason.is_empty() => reason.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP transport error: {:?}", err);
        if err.is_decode() {
            ClientError::Parse(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        ClientError::Parse(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("IO error: {:?}", err);
        ClientError::Storage(err.to_string())
    }
}

/// Result alias used across the crate.
pub type ClientResult<T> = Result<T, ClientError>;
