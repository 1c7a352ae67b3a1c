//! HTTP API
//!
//! | Module | Routes | Auth |
//! |--------|--------|------|
//! | [`health`] | `/health` | - |
//! | [`products`] | `/api/products` | - |
//! | [`store_info`] | `/api/store` | - |
//! | [`proofs`] | `/api/proofs` | - |
//! | [`orders`] | `/api/orders` | - |
//! | [`auth`] | `/api/admin/login` | - |
//! | [`admin`] | `/api/admin/orders` | Bearer |

pub mod admin;
pub mod auth;
pub mod health;
pub mod orders;
pub mod products;
pub mod proofs;
pub mod store_info;

use std::time::Duration;

use axum::{Router, middleware};
use http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_admin;
use crate::core::ServerState;

pub use crate::utils::AppResult;

/// Every route, before auth and tower layers
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(products::router())
        .merge(store_info::router())
        .merge(proofs::router(state.config.max_upload_bytes))
        .merge(orders::router())
        .merge(auth::router())
        .merge(admin::router())
}

/// Complete application: routes, admin guard, state and tower middleware
pub fn router(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);
    build_app(&state)
        // require_admin skips everything outside /api/admin/*
        .layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
