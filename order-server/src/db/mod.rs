//! Database access layer
//!
//! `OrderStore` is the seam between the HTTP handlers and storage:
//! - [`PgStore`]: PostgreSQL via sqlx (production)
//! - [`MemoryStore`]: in-process maps (tests, local demos)

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use shared::models::{OrderDetail, OrderSummary, OrderUpsert, Product};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row".into()),
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for RepoError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        RepoError::Database(format!("Failed to apply migrations: {err}"))
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Order / product storage
///
/// Writes touching both `orders` and `order_products` are atomic per call.
#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    /// All orders with their line-item count, ordered by id
    async fn list_orders(&self) -> RepoResult<Vec<OrderSummary>>;

    /// All catalog products, ordered by id
    async fn list_products(&self) -> RepoResult<Vec<Product>>;

    /// One order with its line items joined to products
    async fn find_order(&self, id: i64) -> RepoResult<Option<OrderDetail>>;

    /// Insert the order and its line items, returning the generated id
    async fn create_order(&self, data: &OrderUpsert) -> RepoResult<i64>;

    /// Overwrite the order fields and replace its line items.
    /// Returns `false` when no order has this id.
    async fn update_order(&self, id: i64, data: &OrderUpsert) -> RepoResult<bool>;

    /// Delete line items, then the order. Returns the number of orders removed.
    async fn delete_order(&self, id: i64) -> RepoResult<u64>;

    /// Cheap connectivity check
    async fn ping(&self) -> RepoResult<()>;
}
