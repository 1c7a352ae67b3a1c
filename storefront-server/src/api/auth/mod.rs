//! Admin Auth Routes

mod handler;

use axum::{Router, routing::post};

use crate::auth::middleware::LOGIN_PATH;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(LOGIN_PATH, post(handler::login))
}
