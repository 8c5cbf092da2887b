//! In-memory order store
//!
//! Mirrors the PostgreSQL schema closely enough for handler tests:
//! ids are assigned sequentially, line items must reference a known
//! product, and a failing write leaves no partial state.

use std::collections::BTreeMap;

use async_trait::async_trait;
use shared::models::{LineItemInput, Order, OrderDetail, OrderLine, OrderSummary, OrderUpsert, Product};
use tokio::sync::RwLock;

use super::{OrderStore, RepoError, RepoResult};

#[derive(Default)]
struct Tables {
    products: BTreeMap<i64, Product>,
    orders: BTreeMap<i64, Order>,
    /// `(order_id, item)` in insertion order
    order_products: Vec<(i64, LineItemInput)>,
    next_order_id: i64,
}

impl Tables {
    fn check_products(&self, items: &[LineItemInput]) -> RepoResult<()> {
        match items
            .iter()
            .find(|item| !self.products.contains_key(&item.product_id))
        {
            Some(missing) => Err(RepoError::Database(format!(
                "insert on table \"order_products\" violates foreign key constraint: product {} does not exist",
                missing.product_id
            ))),
            None => Ok(()),
        }
    }

    fn lines_of(&self, order_id: i64) -> Vec<OrderLine> {
        self.order_products
            .iter()
            .filter(|(oid, _)| *oid == order_id)
            .filter_map(|(_, item)| {
                self.products.get(&item.product_id).map(|p| OrderLine {
                    id: p.id,
                    name: p.name.clone(),
                    unit_price: p.unit_price,
                    quantity: item.quantity,
                })
            })
            .collect()
    }
}

/// Store backed by process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with a product catalog
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let tables = Tables {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn list_orders(&self) -> RepoResult<Vec<OrderSummary>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .values()
            .map(|order| OrderSummary {
                id: order.id,
                order_number: order.order_number.clone(),
                date: order.date,
                status: order.status,
                final_price: order.final_price,
                num_products: tables
                    .order_products
                    .iter()
                    .filter(|(oid, _)| *oid == order.id)
                    .count() as i64,
            })
            .collect())
    }

    async fn list_products(&self) -> RepoResult<Vec<Product>> {
        Ok(self.tables.read().await.products.values().cloned().collect())
    }

    async fn find_order(&self, id: i64) -> RepoResult<Option<OrderDetail>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .get(&id)
            .cloned()
            .map(|order| OrderDetail::from_parts(order, tables.lines_of(id))))
    }

    async fn create_order(&self, data: &OrderUpsert) -> RepoResult<i64> {
        let mut tables = self.tables.write().await;
        tables.check_products(&data.products)?;

        tables.next_order_id += 1;
        let id = tables.next_order_id;
        tables.orders.insert(
            id,
            Order {
                id,
                order_number: data.order_number.clone(),
                date: data.date,
                status: data.status,
                final_price: data.final_price,
            },
        );
        tables
            .order_products
            .extend(data.products.iter().map(|item| (id, *item)));
        Ok(id)
    }

    async fn update_order(&self, id: i64, data: &OrderUpsert) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.orders.contains_key(&id) {
            return Ok(false);
        }
        tables.check_products(&data.products)?;

        if let Some(order) = tables.orders.get_mut(&id) {
            order.order_number = data.order_number.clone();
            order.date = data.date;
            order.status = data.status;
            order.final_price = data.final_price;
        }
        tables.order_products.retain(|(oid, _)| *oid != id);
        tables
            .order_products
            .extend(data.products.iter().map(|item| (id, *item)));
        Ok(true)
    }

    async fn delete_order(&self, id: i64) -> RepoResult<u64> {
        let mut tables = self.tables.write().await;
        tables.order_products.retain(|(oid, _)| *oid != id);
        Ok(tables.orders.remove(&id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::OrderStatus;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Keyboard", 45.0),
            Product::new(2, "Mouse", 19.5),
        ]
    }

    fn payload(items: &[(i64, i32)]) -> OrderUpsert {
        OrderUpsert {
            order_number: "ORD-100".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: OrderStatus::Pending,
            final_price: 0.0,
            products: items
                .iter()
                .map(|&(product_id, quantity)| LineItemInput {
                    product_id,
                    quantity,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = MemoryStore::with_products(catalog());
        let a = store.create_order(&payload(&[])).await.unwrap();
        let b = store.create_order(&payload(&[])).await.unwrap();
        assert_eq!((a, b), (1, 2));
    }

    #[tokio::test]
    async fn test_unknown_product_leaves_no_order() {
        let store = MemoryStore::with_products(catalog());
        let err = store
            .create_order(&payload(&[(1, 1), (99, 1)]))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Database(_)));
        assert!(store.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lines_keep_insertion_order() {
        let store = MemoryStore::with_products(catalog());
        let id = store
            .create_order(&payload(&[(2, 3), (1, 1)]))
            .await
            .unwrap();
        let detail = store.find_order(id).await.unwrap().unwrap();
        let ids: Vec<i64> = detail.products.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(detail.products[0].name, "Mouse");
    }

    #[tokio::test]
    async fn test_delete_counts_removed_orders() {
        let store = MemoryStore::with_products(catalog());
        let id = store.create_order(&payload(&[(1, 2)])).await.unwrap();
        assert_eq!(store.delete_order(id).await.unwrap(), 1);
        assert_eq!(store.delete_order(id).await.unwrap(), 0);
    }
}
