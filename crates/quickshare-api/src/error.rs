//! API error types and conversions

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quickshare_core::StorageError;

/// API error type that converts to plain-text HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 404 Not Found
    NotFound(String),
    /// 409 Conflict
    Conflict(String),
    /// 413 Payload Too Large
    PayloadTooLarge(String),
    /// 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    /// HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Internal(msg) => msg,
        };

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %message, "API error");
        } else if status.is_client_error() {
            tracing::debug!(status = status.as_u16(), %message, "API client error");
        }

        (status, message).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(name) => ApiError::NotFound(format!("File not found: {}", name)),
            StorageError::InvalidName(name) => {
                ApiError::BadRequest(format!("Invalid file name: {:?}", name))
            }
            StorageError::NotAFile(name) => {
                ApiError::Conflict(format!("Not a regular file: {}", name))
            }
            err @ (StorageError::NotADirectory(_) | StorageError::Io(_)) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        let message = err.body_text();
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(message)
        } else {
            ApiError::BadRequest(message)
        }
    }
}
