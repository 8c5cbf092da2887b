//! Product Model

use serde::{Deserialize, Serialize};

/// Catalog product (read-only from the order API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub unit_price: f64,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, unit_price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
        }
    }
}
