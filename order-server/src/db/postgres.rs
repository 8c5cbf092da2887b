//! PostgreSQL order store

use async_trait::async_trait;
use shared::models::{LineItemInput, Order, OrderDetail, OrderLine, OrderSummary, OrderUpsert, Product};
use sqlx::postgres::{PgConnection, PgPoolOptions};
use sqlx::PgPool;

use super::{OrderStore, RepoResult};
use crate::config::Config;

/// sqlx-backed store over a connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap a pool whose schema is already migrated
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open the pool and apply pending migrations
    pub async fn connect(config: &Config) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        tracing::info!(
            max_connections = config.max_connections,
            "Database connection established"
        );

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self::new(pool))
    }
}

/// Bulk-insert line items for one order
async fn insert_lines(
    conn: &mut PgConnection,
    order_id: i64,
    items: &[LineItemInput],
) -> RepoResult<()> {
    if items.is_empty() {
        return Ok(());
    }

    let order_ids: Vec<i64> = items.iter().map(|_| order_id).collect();
    let product_ids: Vec<i64> = items.iter().map(|i| i.product_id).collect();
    let quantities: Vec<i32> = items.iter().map(|i| i.quantity).collect();

    sqlx::query(
        r#"
        INSERT INTO order_products (order_id, product_id, quantity)
        SELECT * FROM UNNEST($1::bigint[], $2::bigint[], $3::integer[])
        "#,
    )
    .bind(&order_ids)
    .bind(&product_ids)
    .bind(&quantities)
    .execute(conn)
    .await?;
    Ok(())
}

#[async_trait]
impl OrderStore for PgStore {
    async fn list_orders(&self) -> RepoResult<Vec<OrderSummary>> {
        let rows = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT o.id, o.order_number, o.date, o.status, o.final_price,
                   COUNT(op.product_id) AS num_products
            FROM orders o
            LEFT JOIN order_products op ON o.id = op.order_id
            GROUP BY o.id
            ORDER BY o.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_products(&self) -> RepoResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, name, unit_price FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_order(&self, id: i64) -> RepoResult<Option<OrderDetail>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, order_number, date, status, final_price FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT p.id, p.name, p.unit_price, op.quantity
            FROM order_products op
            JOIN products p ON op.product_id = p.id
            WHERE op.order_id = $1
            ORDER BY op.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(OrderDetail::from_parts(order, lines)))
    }

    async fn create_order(&self, data: &OrderUpsert) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await?;

        let (order_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO orders (order_number, date, status, final_price)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&data.order_number)
        .bind(data.date)
        .bind(data.status)
        .bind(data.final_price)
        .fetch_one(&mut *tx)
        .await?;

        insert_lines(&mut tx, order_id, &data.products).await?;

        tx.commit().await?;
        Ok(order_id)
    }

    async fn update_order(&self, id: i64, data: &OrderUpsert) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE orders
            SET order_number = $1, date = $2, status = $3, final_price = $4
            WHERE id = $5
            "#,
        )
        .bind(&data.order_number)
        .bind(data.date)
        .bind(data.status)
        .bind(data.final_price)
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        // Replace line items
        sqlx::query("DELETE FROM order_products WHERE order_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_lines(&mut tx, id, &data.products).await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn delete_order(&self, id: i64) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_products WHERE order_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted)
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
