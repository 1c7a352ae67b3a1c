//! Admin extractor
//!
//! Handlers under `/api/admin/*` take [`AdminUser`] as an argument; the
//! middleware has already validated the token and stored the principal.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::AdminUser;
use crate::utils::AppError;

impl<S: Send + Sync> FromRequestParts<S> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminUser>()
            .cloned()
            .ok_or_else(AppError::not_authenticated)
    }
}
