use axum::{Json, extract::State};
use shared::models::Product;

use crate::error::ServiceResult;
use crate::state::AppState;

/// GET /products
pub async fn list_products(State(state): State<AppState>) -> ServiceResult<Json<Vec<Product>>> {
    let products = state.store.list_products().await?;
    Ok(Json(products))
}
