//! "My Orders" list page

use shared::models::{OrderStatus, OrderSummary, OrderUpsert};

use super::{ADD_ORDER_ROUTE, Notice, edit_order_route};
use crate::{ClientError, ClientResult, OrdersApi};

const LOAD_FAILED: &str = "Could not load orders";
const STATUS_FAILED: &str = "Could not update order status";
const DELETE_FAILED: &str = "Could not delete order";

/// State behind the order list page
#[derive(Debug, Default)]
pub struct MyOrders {
    orders: Vec<OrderSummary>,
    pending_delete: Option<i64>,
    notice: Option<Notice>,
}

impl MyOrders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the order list, replacing the current rows
    pub async fn load<A: OrdersApi + ?Sized>(&mut self, api: &A) -> ClientResult<()> {
        match api.list_orders().await {
            Ok(orders) => {
                self.orders = orders;
                Ok(())
            }
            Err(e) => Err(self.fail(LOAD_FAILED, e)),
        }
    }

    pub fn orders(&self) -> &[OrderSummary] {
        &self.orders
    }

    pub fn order(&self, id: i64) -> Option<&OrderSummary> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Edit and delete buttons are disabled for completed orders
    pub fn can_modify(&self, id: i64) -> bool {
        self.order(id).is_some_and(|o| !o.status.is_locked())
    }

    /// Navigation target of the edit button
    pub fn edit_route(&self, id: i64) -> Option<String> {
        self.can_modify(id).then(|| edit_order_route(id))
    }

    /// Navigation target of the "Add New Order" link
    pub fn add_route(&self) -> &'static str {
        ADD_ORDER_ROUTE
    }

    /// Change an order's status from the inline selector
    ///
    /// The detail is fetched first so the PUT carries the full line-item set.
    pub async fn change_status<A: OrdersApi + ?Sized>(
        &mut self,
        api: &A,
        id: i64,
        status: OrderStatus,
    ) -> ClientResult<()> {
        let result = async {
            let detail = api.get_order(id).await?;
            let mut payload = OrderUpsert::from_detail(&detail);
            payload.status = status;
            api.update_order(id, &payload).await
        }
        .await;

        match result {
            Ok(_) => {
                if let Some(row) = self.orders.iter_mut().find(|o| o.id == id) {
                    row.status = status;
                }
                tracing::info!(order_id = id, status = %status, "Order status changed");
                Ok(())
            }
            Err(e) => Err(self.fail(STATUS_FAILED, e)),
        }
    }

    /// Open the delete confirmation for an order
    ///
    /// Returns false when the order is unknown or locked.
    pub fn request_delete(&mut self, id: i64) -> bool {
        if !self.can_modify(id) {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    /// Order awaiting delete confirmation
    pub fn pending_delete(&self) -> Option<&OrderSummary> {
        self.pending_delete.and_then(|id| self.order(id))
    }

    pub fn delete_prompt(&self) -> Option<String> {
        self.pending_delete().map(|o| {
            format!(
                "Are you sure you want to delete the order {}?",
                o.order_number
            )
        })
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the pending order and drop its row
    ///
    /// On failure the dialog stays open.
    pub async fn confirm_delete<A: OrdersApi + ?Sized>(&mut self, api: &A) -> ClientResult<()> {
        let Some(id) = self.pending_delete else {
            return Ok(());
        };

        match api.delete_order(id).await {
            Ok(_) => {
                self.orders.retain(|o| o.id != id);
                self.pending_delete = None;
                tracing::info!(order_id = id, "Order deleted");
                Ok(())
            }
            Err(e) => Err(self.fail(DELETE_FAILED, e)),
        }
    }

    fn fail(&mut self, message: &str, error: ClientError) -> ClientError {
        tracing::error!(error = %error, "{message}");
        self.notice = Some(Notice::error(message));
        error
    }
}
