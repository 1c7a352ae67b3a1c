//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use shared::client::{LoginRequest, LoginResponse};

use crate::auth::password::verify_password_blocking;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// Admin login
///
/// Every attempt waits the configured fixed delay before answering, and a
/// wrong username and a wrong password produce the same error.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let config = &state.config;

    // Always run the hash check so both failure paths cost the same
    let password_ok =
        verify_password_blocking(req.password.clone(), config.admin_password_hash.clone()).await?;
    let username_ok = req.username == config.admin_username;

    tokio::time::sleep(Duration::from_millis(config.login_delay_ms)).await;

    if !(password_ok && username_ok) {
        security_log!("WARN", "login_failed", username = req.username.clone());
        return Err(AppError::invalid_credentials());
    }

    let issued = state
        .jwt_service
        .generate_token(&config.admin_username)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))?;

    security_log!("INFO", "login_success", username = req.username.clone());

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        username: config.admin_username.clone(),
    }))
}
