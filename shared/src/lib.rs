//! Shared types for the order management service
//!
//! Domain models, money helpers and the unified error type used by
//! both `order-server` and `order-client`.

pub mod error;
pub mod models;
pub mod money;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
