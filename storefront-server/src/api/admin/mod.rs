//! Admin Order Routes
//!
//! All routes sit behind [`crate::auth::require_admin`].
//!
//! | Path | Method |
//! |------|--------|
//! | /api/admin/orders | GET |
//! | /api/admin/orders/stats | GET |
//! | /api/admin/orders/{id} | GET, DELETE |
//! | /api/admin/orders/{id}/status | PUT |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/stats", get(handler::stats))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/{id}/status", put(handler::update_status))
}
