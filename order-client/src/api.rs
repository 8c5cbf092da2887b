//! Order API surface used by the views

use async_trait::async_trait;
use shared::models::{OrderDetail, OrderOpResult, OrderSummary, OrderUpsert, Product};

use crate::ClientResult;

/// The calls the order pages make against the backend
#[async_trait]
pub trait OrdersApi: Send + Sync {
    async fn list_orders(&self) -> ClientResult<Vec<OrderSummary>>;

    async fn list_products(&self) -> ClientResult<Vec<Product>>;

    async fn get_order(&self, id: i64) -> ClientResult<OrderDetail>;

    async fn create_order(&self, data: &OrderUpsert) -> ClientResult<OrderOpResult>;

    async fn update_order(&self, id: i64, data: &OrderUpsert) -> ClientResult<OrderOpResult>;

    async fn delete_order(&self, id: i64) -> ClientResult<OrderOpResult>;
}
