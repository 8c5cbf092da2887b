//! Page view-models
//!
//! Each view-model owns the state a page renders from and performs the
//! API calls its buttons trigger. Rendering itself is left to the host UI.

mod edit_order;
mod my_orders;

pub use edit_order::{EditOrder, LineRow, ProductDraft};
pub use my_orders::MyOrders;

/// List page route
pub const MY_ORDERS_ROUTE: &str = "/my-orders";

/// New order route
pub const ADD_ORDER_ROUTE: &str = "/add-order";

/// Edit page route for one order
pub fn edit_order_route(id: i64) -> String {
    format!("/edit-order/{id}")
}

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Transient message shown to the user (snackbar / alert)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-process `OrdersApi` for view tests

    use std::sync::Mutex;

    use async_trait::async_trait;
    use shared::models::{
        OrderDetail, OrderLine, OrderOpResult, OrderSummary, OrderUpsert, Product,
    };

    use crate::{ClientError, ClientResult, OrdersApi};

    #[derive(Default)]
    pub struct FakeApi {
        pub orders: Mutex<Vec<OrderDetail>>,
        pub products: Vec<Product>,
        pub fail: bool,
        pub writes: Mutex<Vec<(String, Option<OrderUpsert>)>>,
    }

    impl FakeApi {
        pub fn new(products: Vec<Product>) -> Self {
            Self {
                products,
                ..Default::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn insert(&self, detail: OrderDetail) {
            self.orders.lock().unwrap().push(detail);
        }

        fn check(&self) -> ClientResult<()> {
            if self.fail {
                return Err(ClientError::Internal("boom".to_string()));
            }
            Ok(())
        }

        fn detail_from(&self, id: i64, data: &OrderUpsert) -> OrderDetail {
            let products = data
                .products
                .iter()
                .filter_map(|item| {
                    self.products
                        .iter()
                        .find(|p| p.id == item.product_id)
                        .map(|p| OrderLine {
                            id: p.id,
                            name: p.name.clone(),
                            unit_price: p.unit_price,
                            quantity: item.quantity,
                        })
                })
                .collect();
            OrderDetail {
                id,
                order_number: data.order_number.clone(),
                date: data.date,
                status: data.status,
                final_price: data.final_price,
                products,
            }
        }
    }

    #[async_trait]
    impl OrdersApi for FakeApi {
        async fn list_orders(&self) -> ClientResult<Vec<OrderSummary>> {
            self.check()?;
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .map(|o| OrderSummary {
                    id: o.id,
                    order_number: o.order_number.clone(),
                    date: o.date,
                    status: o.status,
                    final_price: o.final_price,
                    num_products: o.products.len() as i64,
                })
                .collect())
        }

        async fn list_products(&self) -> ClientResult<Vec<Product>> {
            self.check()?;
            Ok(self.products.clone())
        }

        async fn get_order(&self, id: i64) -> ClientResult<OrderDetail> {
            self.check()?;
            self.orders
                .lock()
                .unwrap()
                .iter()
                .find(|o| o.id == id)
                .cloned()
                .ok_or_else(|| ClientError::NotFound("Order not found".to_string()))
        }

        async fn create_order(&self, data: &OrderUpsert) -> ClientResult<OrderOpResult> {
            self.check()?;
            let id = self.orders.lock().unwrap().len() as i64 + 1;
            let detail = self.detail_from(id, data);
            self.insert(detail);
            self.writes
                .lock()
                .unwrap()
                .push(("POST".to_string(), Some(data.clone())));
            Ok(OrderOpResult::created(id))
        }

        async fn update_order(&self, id: i64, data: &OrderUpsert) -> ClientResult<OrderOpResult> {
            self.check()?;
            let detail = self.detail_from(id, data);
            let mut orders = self.orders.lock().unwrap();
            let slot = orders
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or_else(|| ClientError::NotFound("Order not found".to_string()))?;
            *slot = detail;
            drop(orders);
            self.writes
                .lock()
                .unwrap()
                .push(("PUT".to_string(), Some(data.clone())));
            Ok(OrderOpResult::updated(id))
        }

        async fn delete_order(&self, id: i64) -> ClientResult<OrderOpResult> {
            self.check()?;
            self.orders.lock().unwrap().retain(|o| o.id != id);
            self.writes.lock().unwrap().push(("DELETE".to_string(), None));
            Ok(OrderOpResult::deleted(id))
        }
    }
}
