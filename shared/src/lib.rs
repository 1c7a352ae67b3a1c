//! Shared types for the Visionary storefront
//!
//! Data model, static catalog, money helpers and the unified error system
//! used by both `storefront-server` and `storefront-client`.

pub mod catalog;
pub mod client;
pub mod error;
pub mod models;
pub mod money;
pub mod util;
pub mod validation;
pub mod whatsapp;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use catalog::Product;
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use models::{CartItem, Order, OrderDetail, OrderItem, OrderStats, OrderStatus};
