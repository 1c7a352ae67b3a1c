//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error type every API handler returns:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (`field` for validation errors)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Field name attached by a validation error, if any
    pub fn field(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|d| d.get("field"))
            .and_then(Value::as_str)
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Missing required field, tagged with the field name
    pub fn required_field(field: &str, msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::RequiredField, msg).with_detail("field", field)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    pub fn order_not_found(id: impl Into<String>) -> Self {
        Self::new(ErrorCode::OrderNotFound).with_detail("order_id", id.into())
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create an invalid token error
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    /// Create a token expired error
    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create an object storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StorageError, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }
}

/// Error envelope
///
/// Success bodies are the bare payload; every failure is returned as:
/// - `code`: numeric [`ErrorCode`]
/// - `message`: Human-readable message
/// - `details`: Additional error details (`field` for validation errors)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }

    /// Rebuild the [`AppError`] carried by an error body
    ///
    /// Unknown codes map to [`ErrorCode::Unknown`] so a newer server never
    /// breaks an older client.
    pub fn into_error(self) -> AppError {
        let code = self
            .code
            .and_then(|c| ErrorCode::try_from(c).ok())
            .unwrap_or(ErrorCode::Unknown);
        AppError {
            code,
            message: self.message,
            details: self.details,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::error(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::OrderNotFound);
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.message, "Order not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_required_field_carries_field() {
        let err = AppError::required_field("cohort", "Cohort is required");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.field(), Some("cohort"));
        assert_eq!(err.to_string(), "Cohort is required");
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing required fields")
            .with_detail("field", "nickname")
            .with_detail("reason", "required");

        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "nickname");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::order_not_found("abc").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::not_authenticated().http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::storage("disk full").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_constructor() {
        let err = AppError::not_found("Proof");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Proof not found");
        assert!(err.details.as_ref().unwrap().contains_key("resource"));
    }

    #[test]
    fn test_api_response_error_roundtrip() {
        let err = AppError::required_field("customer_name", "Name is required");
        let json = serde_json::to_string(&ApiResponse::error(&err)).unwrap();
        assert!(json.contains("\"code\":7"));

        let parsed: ApiResponse = serde_json::from_str(&json).unwrap();
        let back = parsed.into_error();
        assert_eq!(back.code, ErrorCode::RequiredField);
        assert_eq!(back.field(), Some("customer_name"));
    }

    #[test]
    fn test_into_error_unknown_code() {
        let json = r#"{"code":31337,"message":"from the future"}"#;
        let parsed: ApiResponse = serde_json::from_str(json).unwrap();
        let err = parsed.into_error();
        assert_eq!(err.code, ErrorCode::Unknown);
        assert_eq!(err.message, "from the future");
    }
}
