//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{AdminUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Prefix of every route that needs an admin session
pub const ADMIN_PREFIX: &str = "/api/admin/";

/// The one admin route reachable without a token
pub const LOGIN_PATH: &str = "/api/admin/login";

fn is_protected(path: &str) -> bool {
    path.starts_with(ADMIN_PREFIX) && path != LOGIN_PATH
}

/// Admin guard, applied to the whole router
///
/// Extracts and validates the `Authorization: Bearer <token>` header on
/// `/api/admin/*` (login excepted) and inserts [`AdminUser`] into the request
/// extensions. Every other path passes straight through.
///
/// | Failure | Code |
/// |---------|------|
/// | no header | `NotAuthenticated` (401) |
/// | expired token | `TokenExpired` (401) |
/// | anything else | `TokenInvalid` (401) |
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !is_protected(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = req.uri().to_string());
            return Err(AppError::not_authenticated());
        }
    };

    let claims = state.jwt_service.validate_token(token);
    match claims.and_then(AdminUser::try_from) {
        Ok(admin) => {
            req.extensions_mut().insert(admin);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = req.uri().to_string()
            );
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_paths() {
        assert!(is_protected("/api/admin/orders"));
        assert!(is_protected("/api/admin/orders/abc/status"));
        assert!(!is_protected("/api/admin/login"));
        assert!(!is_protected("/api/orders/abc"));
        assert!(!is_protected("/api/products"));
        assert!(!is_protected("/health"));
    }
}
