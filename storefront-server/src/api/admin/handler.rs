//! Admin Order Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::client::DeleteResponse;
use shared::models::{Order, OrderDetail, OrderStats, OrderStatusUpdate};

use crate::auth::AdminUser;
use crate::core::ServerState;
use crate::db::repository::order;
use crate::utils::{AppError, AppResult};

/// All orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = order::find_all(state.pool()).await?;
    Ok(Json(orders))
}

pub async fn stats(
    State(state): State<ServerState>,
    _admin: AdminUser,
) -> AppResult<Json<OrderStats>> {
    Ok(Json(order::stats(state.pool()).await?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order::find_detail(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::order_not_found(id))?;
    Ok(Json(detail))
}

/// Set any status; last write wins
pub async fn update_status(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let updated = order::update_status(state.pool(), &id, payload.status)
        .await?
        .ok_or_else(|| AppError::order_not_found(id.clone()))?;

    tracing::info!(
        order_id = %id,
        status = %updated.status,
        admin = %admin.username,
        "Order status updated"
    );
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<ServerState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    if !order::delete(state.pool(), &id).await? {
        return Err(AppError::order_not_found(id));
    }

    tracing::info!(order_id = %id, admin = %admin.username, "Order deleted");
    Ok(Json(DeleteResponse { id, deleted: true }))
}
