//! Admin authentication
//!
//! - [`JwtService`] issues and validates admin session tokens
//! - [`password`] hashes and verifies the configured admin password
//! - [`require_admin`] guards every `/api/admin/*` route except login
//! - [`AdminUser`] is the authenticated principal handed to handlers

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{AdminUser, Claims, IssuedToken, JwtConfig, JwtError, JwtService};
pub use middleware::require_admin;
