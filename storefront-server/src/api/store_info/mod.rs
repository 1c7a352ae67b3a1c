//! Store Info API
//!
//! Bank transfer details and the merchant WhatsApp contact shown at checkout.

use axum::{Json, Router, extract::State, routing::get};
use shared::models::StoreInfo;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/store", get(get_store_info))
}

async fn get_store_info(State(state): State<ServerState>) -> Json<StoreInfo> {
    Json(state.config.store_info())
}
