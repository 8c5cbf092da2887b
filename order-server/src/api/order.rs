//! Order endpoints
//!
//! Each write validates the payload, then runs one store call; the store
//! keeps the order row and its line items consistent.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use shared::error::AppError;
use shared::models::{OrderDetail, OrderOpResult, OrderSummary, OrderUpsert};

use crate::error::ServiceResult;
use crate::state::AppState;

type ApiResult<T> = ServiceResult<Json<T>>;

/// Order id from the path; malformed ids are rejected through `ServiceError`
type OrderId = Result<Path<i64>, PathRejection>;

/// Order payload; malformed bodies are rejected through `ServiceError`
type OrderBody = Result<Json<OrderUpsert>, JsonRejection>;

/// GET /orders
pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Vec<OrderSummary>> {
    let orders = state.store.list_orders().await?;
    Ok(Json(orders))
}

/// GET /orders/{id}
pub async fn get_order(State(state): State<AppState>, id: OrderId) -> ApiResult<OrderDetail> {
    let Path(id) = id?;
    let order = state
        .store
        .find_order(id)
        .await?
        .ok_or_else(|| AppError::order_not_found(id))?;
    Ok(Json(order))
}

/// POST /orders
pub async fn create_order(
    State(state): State<AppState>,
    body: OrderBody,
) -> ServiceResult<(StatusCode, Json<OrderOpResult>)> {
    let Json(data) = body?;
    data.validate()?;

    let id = state.store.create_order(&data).await?;
    tracing::info!(
        order_id = id,
        order_number = %data.order_number,
        items = data.products.len(),
        "Order created"
    );

    Ok((StatusCode::CREATED, Json(OrderOpResult::created(id))))
}

/// PUT /orders/{id}
///
/// Replaces the order fields and its whole line-item set.
pub async fn update_order(
    State(state): State<AppState>,
    id: OrderId,
    body: OrderBody,
) -> ApiResult<OrderOpResult> {
    let Path(id) = id?;
    let Json(data) = body?;
    data.validate()?;

    if !state.store.update_order(id, &data).await? {
        return Err(AppError::order_not_found(id).into());
    }
    tracing::info!(
        order_id = id,
        status = %data.status,
        items = data.products.len(),
        "Order updated"
    );

    Ok(Json(OrderOpResult::updated(id)))
}

/// DELETE /orders/{id}
///
/// Succeeds whether or not the order existed.
pub async fn delete_order(State(state): State<AppState>, id: OrderId) -> ApiResult<OrderOpResult> {
    let Path(id) = id?;
    let removed = state.store.delete_order(id).await?;
    tracing::info!(order_id = id, removed, "Order deleted");
    Ok(Json(OrderOpResult::deleted(id)))
}
