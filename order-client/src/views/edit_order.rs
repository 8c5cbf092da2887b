//! "Edit Order" page
//!
//! Holds the order header, its line-item rows and the add-product dialog.
//! `final_price` is recomputed from the rows on every add and remove.

use chrono::NaiveDate;
use shared::models::{
    LineItemInput, MAX_QUANTITY, OrderDetail, OrderOpResult, OrderStatus, OrderUpsert, Product,
};
use shared::money;

use super::{MY_ORDERS_ROUTE, Notice};
use crate::{ClientError, ClientResult, OrdersApi};

/// One line-item row in the products table
#[derive(Debug, Clone, PartialEq)]
pub struct LineRow {
    /// Row key, unique within this page
    pub row_id: u32,
    pub product_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i32,
}

impl LineRow {
    pub fn total_price(&self) -> f64 {
        money::to_f64(money::line_total(self.unit_price, self.quantity))
    }
}

/// Add-product dialog state
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub product: Option<Product>,
    pub quantity: i32,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            product: None,
            quantity: 1,
        }
    }
}

impl ProductDraft {
    /// Unit price is always the catalog price of the selected product
    pub fn unit_price(&self) -> Option<f64> {
        self.product.as_ref().map(|p| p.unit_price)
    }
}

/// State behind the edit (or new) order page
#[derive(Debug, Clone)]
pub struct EditOrder {
    /// None until a new order has been saved
    id: Option<i64>,
    order_number: String,
    date: NaiveDate,
    status: OrderStatus,
    final_price: f64,
    rows: Vec<LineRow>,
    next_row_id: u32,
    catalog: Vec<Product>,
    add_dialog_open: bool,
    draft: ProductDraft,
    notice: Option<Notice>,
    redirect: Option<&'static str>,
}

impl EditOrder {
    /// Fetch an existing order and the product catalog
    pub async fn load<A: OrdersApi + ?Sized>(api: &A, id: i64) -> ClientResult<Self> {
        let (detail, catalog) = tokio::try_join!(api.get_order(id), api.list_products())
            .inspect_err(|e| tracing::error!(order_id = id, error = %e, "Failed to load order"))?;
        Ok(Self::from_detail(detail, catalog))
    }

    /// Start an empty order; `save` will create it
    pub async fn new_order<A: OrdersApi + ?Sized>(
        api: &A,
        order_number: impl Into<String>,
        date: NaiveDate,
    ) -> ClientResult<Self> {
        let catalog = api
            .list_products()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to load products"))?;
        Ok(Self::blank(order_number, date, catalog))
    }

    /// Page state for an existing order
    ///
    /// The stored `final_price` is shown as-is until the rows change.
    pub fn from_detail(detail: OrderDetail, catalog: Vec<Product>) -> Self {
        let rows: Vec<LineRow> = detail
            .products
            .into_iter()
            .zip(1..)
            .map(|(line, row_id)| LineRow {
                row_id,
                product_id: line.id,
                name: line.name,
                unit_price: line.unit_price,
                quantity: line.quantity,
            })
            .collect();

        Self {
            id: Some(detail.id),
            order_number: detail.order_number,
            date: detail.date,
            status: detail.status,
            final_price: detail.final_price,
            next_row_id: rows.len() as u32 + 1,
            rows,
            catalog,
            add_dialog_open: false,
            draft: ProductDraft::default(),
            notice: None,
            redirect: None,
        }
    }

    pub fn blank(order_number: impl Into<String>, date: NaiveDate, catalog: Vec<Product>) -> Self {
        Self {
            id: None,
            order_number: order_number.into(),
            date,
            status: OrderStatus::Pending,
            final_price: 0.0,
            rows: Vec::new(),
            next_row_id: 1,
            catalog,
            add_dialog_open: false,
            draft: ProductDraft::default(),
            notice: None,
            redirect: None,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn final_price(&self) -> f64 {
        self.final_price
    }

    pub fn rows(&self) -> &[LineRow] {
        &self.rows
    }

    /// Number of line items, shown as "# Products"
    pub fn product_count(&self) -> usize {
        self.rows.len()
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Route to leave for once a save succeeded
    pub fn redirect(&self) -> Option<&'static str> {
        self.redirect
    }

    pub fn set_order_number(&mut self, order_number: impl Into<String>) {
        self.order_number = order_number.into();
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    // ========== Add product dialog ==========

    pub fn is_add_dialog_open(&self) -> bool {
        self.add_dialog_open
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn open_add_dialog(&mut self) {
        self.add_dialog_open = true;
    }

    /// Cancel the dialog, discarding the draft
    pub fn close_add_dialog(&mut self) {
        self.add_dialog_open = false;
        self.draft = ProductDraft::default();
    }

    pub fn select_product(&mut self, product_id: i64) -> ClientResult<()> {
        let product = self
            .catalog
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("product {product_id}")))?;
        self.draft.product = Some(product);
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: i32) -> ClientResult<()> {
        if !(1..=MAX_QUANTITY).contains(&quantity) {
            return Err(ClientError::Validation(format!(
                "quantity must be between 1 and {MAX_QUANTITY}"
            )));
        }
        self.draft.quantity = quantity;
        Ok(())
    }

    /// Append the draft as a new row and close the dialog
    pub fn add_product(&mut self) -> ClientResult<&LineRow> {
        let product = self
            .draft
            .product
            .take()
            .ok_or_else(|| ClientError::Validation("no product selected".to_string()))?;
        let quantity = self.draft.quantity;

        let row_id = self.next_row_id;
        self.next_row_id += 1;
        self.rows.push(LineRow {
            row_id,
            product_id: product.id,
            name: product.name,
            unit_price: product.unit_price,
            quantity,
        });
        self.recompute_total();
        self.close_add_dialog();

        let index = self.rows.len() - 1;
        Ok(&self.rows[index])
    }

    /// Drop a row; returns false when no row has that id
    pub fn remove_row(&mut self, row_id: u32) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.row_id != row_id);
        let removed = self.rows.len() != before;
        if removed {
            self.recompute_total();
        }
        removed
    }

    fn recompute_total(&mut self) {
        self.final_price =
            money::order_total(self.rows.iter().map(|row| (row.unit_price, row.quantity)));
    }

    /// Payload for the save request
    pub fn to_payload(&self) -> OrderUpsert {
        OrderUpsert {
            order_number: self.order_number.clone(),
            date: self.date,
            status: self.status,
            final_price: self.final_price,
            products: self
                .rows
                .iter()
                .map(|row| LineItemInput {
                    product_id: row.product_id,
                    quantity: row.quantity,
                })
                .collect(),
        }
    }

    /// Submit the order: PUT for an existing order, POST for a new one
    pub async fn save<A: OrdersApi + ?Sized>(&mut self, api: &A) -> ClientResult<OrderOpResult> {
        let payload = self.to_payload();
        let result = match self.id {
            Some(id) => api.update_order(id, &payload).await,
            None => api.create_order(&payload).await,
        };

        match result {
            Ok(op) => {
                tracing::info!(order_id = op.id, "Order saved");
                self.id = Some(op.id);
                self.notice = Some(Notice::success(op.message.clone()));
                self.redirect = Some(MY_ORDERS_ROUTE);
                Ok(op)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save order");
                self.notice = Some(Notice::error(format!("Failed to save order: {e}")));
                Err(e)
            }
        }
    }
}
