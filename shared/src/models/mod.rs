//! Data models
//!
//! Shared between storefront-server and storefront-client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Order ids are UUID v4 strings; item ids are SQLite INTEGER PRIMARY KEY.

pub mod cart;
pub mod order;
pub mod store_info;

// Re-exports
pub use cart::*;
pub use order::*;
pub use store_info::*;
