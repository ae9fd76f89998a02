//! Error types for QuickShare client operations

use thiserror::Error;

/// Result type alias for QuickShare client operations
pub type Result<T> = std::result::Result<T, ShareClientError>;

/// Errors that can occur during QuickShare client operations
#[derive(Error, Debug)]
pub enum ShareClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Server returned an error response
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },
}

impl ShareClientError {
    /// Create a server error from status code and message
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }

    /// HTTP status of a server error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
