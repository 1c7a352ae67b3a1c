//! Payment Proof Routes
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/proofs | POST (multipart `file`) | - |
//! | /api/proofs/{file_name} | GET | - |

mod handler;

use axum::{Router, extract::DefaultBodyLimit, routing::{get, post}};

use crate::core::ServerState;

/// Room for multipart boundaries and headers on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn router(max_upload_bytes: usize) -> Router<ServerState> {
    Router::new().nest("/api/proofs", routes(max_upload_bytes))
}

fn routes(max_upload_bytes: usize) -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            post(handler::upload)
                .layer(DefaultBodyLimit::max(max_upload_bytes + MULTIPART_OVERHEAD)),
        )
        .route("/{file_name}", get(handler::serve))
}
