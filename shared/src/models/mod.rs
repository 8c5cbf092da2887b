//! Data models
//!
//! Shared between order-server and order-client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (PostgreSQL BIGSERIAL). JSON fields are camelCase.

pub mod order;
pub mod product;

// Re-exports
pub use order::*;
pub use product::*;
