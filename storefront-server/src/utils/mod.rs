//! Utilities
//!
//! - [`AppError`] / [`ApiResponse`] re-exported from `shared::error`
//! - logger setup
//! - checkout payload validation

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode, multipart_error};
