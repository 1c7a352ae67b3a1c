//! Catalog Handlers

use axum::{Json, extract::Path};
use shared::catalog::{self, Product};

use crate::utils::{AppError, AppResult, ErrorCode};

/// All purchasable products in display order
pub async fn list() -> Json<Vec<Product>> {
    Json(catalog::all().to_vec())
}

pub async fn get_by_id(Path(id): Path<String>) -> AppResult<Json<Product>> {
    catalog::find(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", id))
}
