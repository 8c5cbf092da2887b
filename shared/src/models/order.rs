//! Order Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, AppResult};
use crate::money;

/// Maximum allowed quantity per line item
pub const MAX_QUANTITY: i32 = 9999;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "order_status"))]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
        }
    }

    /// Completed orders can no longer be edited or deleted from the list page
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("unknown order status: {s}")))
    }
}

/// Order row as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub final_price: f64,
}

/// Order list row: the order plus the number of attached line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: i64,
    pub order_number: String,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub final_price: f64,
    pub num_products: i64,
}

/// Line item joined with its product
///
/// `id` is the product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: i64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i32,
}

/// Order with its full list of line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub id: i64,
    pub order_number: String,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub final_price: f64,
    pub products: Vec<OrderLine>,
}

impl OrderDetail {
    pub fn from_parts(order: Order, products: Vec<OrderLine>) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            date: order.date,
            status: order.status,
            final_price: order.final_price,
            products,
        }
    }
}

/// Line item in a create/update payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    pub product_id: i64,
    pub quantity: i32,
}

/// Create / update order payload
///
/// The line-item set is replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpsert {
    pub order_number: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: OrderStatus,
    pub final_price: f64,
    #[serde(default)]
    pub products: Vec<LineItemInput>,
}

impl OrderUpsert {
    /// Rebuild the payload that reproduces an existing order
    pub fn from_detail(detail: &OrderDetail) -> Self {
        Self {
            order_number: detail.order_number.clone(),
            date: detail.date,
            status: detail.status,
            final_price: detail.final_price,
            products: detail
                .products
                .iter()
                .map(|line| LineItemInput {
                    product_id: line.id,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }

    /// Validate the payload before it reaches storage
    pub fn validate(&self) -> AppResult<()> {
        if self.order_number.trim().is_empty() {
            return Err(AppError::validation("orderNumber must not be empty")
                .with_detail("field", "orderNumber"));
        }

        if !money::is_valid_amount(self.final_price) {
            return Err(AppError::validation(format!(
                "finalPrice must be a finite, non-negative amount, got {}",
                self.final_price
            ))
            .with_detail("field", "finalPrice"));
        }

        for (index, item) in self.products.iter().enumerate() {
            if !(1..=MAX_QUANTITY).contains(&item.quantity) {
                return Err(AppError::validation(format!(
                    "quantity must be between 1 and {MAX_QUANTITY}, got {}",
                    item.quantity
                ))
                .with_detail("field", format!("products[{index}].quantity")));
            }
        }

        Ok(())
    }
}

/// Result of a create / update / delete call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderOpResult {
    pub success: bool,
    pub id: i64,
    pub message: String,
}

impl OrderOpResult {
    pub fn created(id: i64) -> Self {
        Self::ok(id, "Order created successfully")
    }

    pub fn updated(id: i64) -> Self {
        Self::ok(id, "Order updated successfully")
    }

    pub fn deleted(id: i64) -> Self {
        Self::ok(id, "Order deleted successfully")
    }

    fn ok(id: i64, message: &str) -> Self {
        Self {
            success: true,
            id,
            message: message.to_string(),
        }
    }
}
