//! Error helpers
//!
//! All handlers return [`AppResult`]; the shared [`AppError`] renders itself
//! as an [`ApiResponse`] body with the status derived from its code.

use axum::extract::multipart::MultipartError;
use http::StatusCode;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// Map a multipart read failure; an exceeded body limit becomes `FileTooLarge`
pub fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::new(ErrorCode::FileTooLarge)
    } else {
        AppError::with_message(
            ErrorCode::InvalidRequest,
            format!("Invalid multipart request: {}", err.body_text()),
        )
    }
}
