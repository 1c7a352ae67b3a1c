//! Unified error codes for the storefront
//!
//! Error codes are shared by the server, the client library and anything
//! rendering API errors. They are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 5xxx: Payment proof errors
//! - 6xxx: Catalog and cart errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// WhatsApp number is malformed
    InvalidPhoneNumber = 9,

    // ==================== 1xxx: Auth ====================
    /// Admin is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Declared total differs from the item sum
    OrderTotalMismatch = 4002,
    /// Amount is negative or not finite
    InvalidAmount = 4003,
    /// Quantity must be at least one
    InvalidQuantity = 4004,
    /// Unknown order status
    InvalidOrderStatus = 4005,

    // ==================== 5xxx: Payment proof ====================
    /// Payment proof missing
    ProofRequired = 5001,
    /// Upload exceeds the size limit
    FileTooLarge = 5002,
    /// Upload is not an image
    UnsupportedFileType = 5003,
    /// Upload does not decode as an image
    InvalidImage = 5004,
    /// Payment proof not found in the bucket
    ProofNotFound = 5005,

    // ==================== 6xxx: Catalog / Cart ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Cart has no lines
    CartEmpty = 6002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Object storage error
    StorageError = 9003,
    /// Configuration error
    ConfigError = 9004,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::InvalidPhoneNumber => "Please enter a valid WhatsApp number",

            // Auth
            ErrorCode::NotAuthenticated => "Admin login required",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderTotalMismatch => "Order total does not match its items",
            ErrorCode::InvalidAmount => "Invalid amount",
            ErrorCode::InvalidQuantity => "Quantity must be at least 1",
            ErrorCode::InvalidOrderStatus => "Invalid order status",

            // Payment proof
            ErrorCode::ProofRequired => "Please upload proof of payment",
            ErrorCode::FileTooLarge => "File size must be less than 5MB",
            ErrorCode::UnsupportedFileType => "Please upload an image file",
            ErrorCode::InvalidImage => "Invalid image file",
            ErrorCode::ProofNotFound => "Payment proof not found",

            // Catalog / Cart
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::CartEmpty => "Your cart is empty",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::StorageError => "Failed to store file",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::InvalidPhoneNumber),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderTotalMismatch),
            4003 => Ok(ErrorCode::InvalidAmount),
            4004 => Ok(ErrorCode::InvalidQuantity),
            4005 => Ok(ErrorCode::InvalidOrderStatus),

            // Payment proof
            5001 => Ok(ErrorCode::ProofRequired),
            5002 => Ok(ErrorCode::FileTooLarge),
            5003 => Ok(ErrorCode::UnsupportedFileType),
            5004 => Ok(ErrorCode::InvalidImage),
            5005 => Ok(ErrorCode::ProofNotFound),

            // Catalog / Cart
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::CartEmpty),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::StorageError),
            9004 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[ErrorCode] = &[
        ErrorCode::Success,
        ErrorCode::Unknown,
        ErrorCode::ValidationFailed,
        ErrorCode::NotFound,
        ErrorCode::InvalidRequest,
        ErrorCode::RequiredField,
        ErrorCode::InvalidPhoneNumber,
        ErrorCode::NotAuthenticated,
        ErrorCode::InvalidCredentials,
        ErrorCode::TokenExpired,
        ErrorCode::TokenInvalid,
        ErrorCode::OrderNotFound,
        ErrorCode::OrderTotalMismatch,
        ErrorCode::InvalidAmount,
        ErrorCode::InvalidQuantity,
        ErrorCode::InvalidOrderStatus,
        ErrorCode::ProofRequired,
        ErrorCode::FileTooLarge,
        ErrorCode::UnsupportedFileType,
        ErrorCode::InvalidImage,
        ErrorCode::ProofNotFound,
        ErrorCode::ProductNotFound,
        ErrorCode::CartEmpty,
        ErrorCode::InternalError,
        ErrorCode::DatabaseError,
        ErrorCode::StorageError,
        ErrorCode::ConfigError,
    ];

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::InvalidPhoneNumber.code(), 9);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::OrderTotalMismatch.code(), 4002);
        assert_eq!(ErrorCode::FileTooLarge.code(), 5002);
        assert_eq!(ErrorCode::CartEmpty.code(), 6002);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_covers_every_code() {
        for code in ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(*code));
        }
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");

        let code: ErrorCode = serde_json::from_str("5003").unwrap();
        assert_eq!(code, ErrorCode::UnsupportedFileType);

        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_messages() {
        assert_eq!(ErrorCode::OrderNotFound.message(), "Order not found");
        assert_eq!(ErrorCode::CartEmpty.message(), "Your cart is empty");
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::TokenExpired.to_string(), "1003");
    }
}
