//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{OrderCreate, OrderDetail};
use shared::validation::FIELD_PAYMENT_PROOF;

use crate::core::ServerState;
use crate::db::repository::order;
use crate::utils::validation::validate_order_create;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Checkout: insert the order and its items
///
/// The proof URL must point at an object in this server's proof bucket.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderDetail>> {
    validate_order_create(&payload)?;

    let proof_missing = || {
        AppError::new(ErrorCode::ProofNotFound).with_detail("field", FIELD_PAYMENT_PROOF)
    };
    let file_name = state
        .proofs
        .file_name_from_url(payload.proof_of_payment_url.trim())
        .ok_or_else(proof_missing)?;
    if !state.proofs.exists(&file_name).await? {
        return Err(proof_missing());
    }

    let detail = order::create(state.pool(), &payload).await?;

    tracing::info!(
        order_id = %detail.order.id,
        total = detail.order.total_amount,
        items = detail.items.len(),
        "Order placed"
    );
    Ok(Json(detail))
}

/// Tracker lookup: order row plus items
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order::find_detail(state.pool(), id.trim())
        .await?
        .ok_or_else(|| AppError::order_not_found(id))?;
    Ok(Json(detail))
}
