//! Health check
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /health | GET | - |

use axum::{Json, Router, extract::State, routing::get};
use shared::client::HealthResponse;

use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// `ok` once the database answers
async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthResponse>> {
    state.db.ping().await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
