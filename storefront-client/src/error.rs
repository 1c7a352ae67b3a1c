//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::checkout::CheckoutErrors;
use crate::storage::StorageError;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Structured error returned by the server
    #[error("{message}")]
    Api {
        code: ErrorCode,
        message: String,
        /// Offending field for validation errors
        field: Option<String>,
    },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing, expired or rejected credentials
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Local form validation failed; nothing was sent
    #[error("Validation error: {0}")]
    Validation(CheckoutErrors),

    /// Client-local storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Response could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Server error code, when the server produced one
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        match err.http_status().as_u16() {
            404 => ClientError::NotFound(err.message),
            401 => ClientError::Unauthorized(err.message),
            _ => ClientError::Api {
                field: err.field().map(str::to_string),
                code: err.code,
                message: err.message,
            },
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
