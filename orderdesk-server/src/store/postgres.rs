use std::time::Duration;

use async_trait::async_trait;
use orderdesk_data::{transactional, DataError, DataResult};
use sqlx::postgres::{PgConnection, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{like_pattern, OrderStore};
use crate::models::{Order, OrderDetails, OrderSummary, Product};
use crate::settings::DatabaseSettings;

const LIST_ORDERS: &str = r#"
    SELECT o.id, o.orderdescription, o.createdat,
           COUNT(DISTINCT opm.productid) AS countofproducts
    FROM orders o
    LEFT JOIN "OrderProductMap" opm ON o.id = opm.orderid
    GROUP BY o.id, o.orderdescription, o.createdat
    ORDER BY o.id DESC
"#;

const SEARCH_ORDERS: &str = r#"
    SELECT o.id, o.orderdescription, o.createdat,
           COALESCE(
               json_agg(
                   json_build_object(
                       'id', p.id,
                       'productname', p.productname,
                       'productdescription', p.productdescription
                   ) ORDER BY opm.id
               ) FILTER (WHERE p.id IS NOT NULL),
               '[]'::json
           ) AS products
    FROM orders o
    LEFT JOIN "OrderProductMap" opm ON o.id = opm.orderid
    LEFT JOIN products p ON opm.productid = p.id
    WHERE o.id::text = $1
       OR LOWER(o.orderdescription) LIKE LOWER($2)
    GROUP BY o.id, o.orderdescription, o.createdat
    ORDER BY o.id DESC
"#;

#[derive(sqlx::FromRow)]
struct OrderDetailsRow {
    id: i32,
    orderdescription: String,
    createdat: chrono::NaiveDateTime,
    products: Json<Vec<Product>>,
}

impl From<OrderDetailsRow> for OrderDetails {
    fn from(row: OrderDetailsRow) -> Self {
        OrderDetails {
            id: row.id,
            orderdescription: row.orderdescription,
            createdat: row.createdat,
            products: row.products.0,
        }
    }
}

/// [`OrderStore`] over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool sized and timed out per `settings`.
    pub async fn connect(settings: &DatabaseSettings) -> DataResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.pool_size)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .connect(&settings.url)
            .await?;
        tracing::info!(pool_size = settings.pool_size, "connected to database");
        Ok(Self::new(pool))
    }

    /// Create the tables if missing and seed the catalog if it is empty.
    pub async fn setup(&self) -> DataResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(DataError::database)?;
        tracing::info!("database schema ready");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn insert_links(
    conn: &mut PgConnection,
    order_id: i32,
    product_ids: &[i32],
) -> DataResult<()> {
    if product_ids.is_empty() {
        return Ok(());
    }
    let mut builder =
        QueryBuilder::<Postgres>::new(r#"INSERT INTO "OrderProductMap" (orderid, productid) "#);
    builder.push_values(product_ids, |mut row, product_id| {
        row.push_bind(order_id).push_bind(*product_id);
    });
    builder.build().execute(conn).await?;
    Ok(())
}

fn order_not_found(id: i32) -> DataError {
    DataError::NotFound(format!("Order {id} not found"))
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn list_orders(&self) -> DataResult<Vec<OrderSummary>> {
        let orders = sqlx::query_as::<_, OrderSummary>(LIST_ORDERS)
            .fetch_all(&self.pool)
            .await?;
        Ok(orders)
    }

    async fn search_orders(&self, term: &str) -> DataResult<Vec<OrderDetails>> {
        // Postgres text cannot hold NUL, so no stored order can match.
        if term.contains('\0') {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, OrderDetailsRow>(SEARCH_ORDERS)
            .bind(term)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(OrderDetails::from).collect())
    }

    async fn create_order(&self, description: &str, product_ids: &[i32]) -> DataResult<Order> {
        let description = description.to_owned();
        let product_ids = product_ids.to_vec();
        transactional(&self.pool, move |tx| {
            Box::pin(async move {
                let order = sqlx::query_as::<_, Order>(
                    "INSERT INTO orders (orderdescription, createdat) VALUES ($1, NOW()) \
                     RETURNING id, orderdescription, createdat",
                )
                .bind(&description)
                .fetch_one(tx.as_mut())
                .await?;
                insert_links(tx.as_mut(), order.id, &product_ids).await?;
                Ok(order)
            })
        })
        .await
    }

    async fn update_order(
        &self,
        id: i32,
        description: &str,
        product_ids: &[i32],
    ) -> DataResult<Order> {
        let description = description.to_owned();
        let product_ids = product_ids.to_vec();
        transactional(&self.pool, move |tx| {
            Box::pin(async move {
                let order = sqlx::query_as::<_, Order>(
                    "UPDATE orders SET orderdescription = $1 WHERE id = $2 \
                     RETURNING id, orderdescription, createdat",
                )
                .bind(&description)
                .bind(id)
                .fetch_optional(tx.as_mut())
                .await?
                .ok_or_else(|| order_not_found(id))?;

                sqlx::query(r#"DELETE FROM "OrderProductMap" WHERE orderid = $1"#)
                    .bind(id)
                    .execute(tx.as_mut())
                    .await?;
                insert_links(tx.as_mut(), id, &product_ids).await?;
                Ok(order)
            })
        })
        .await
    }

    async fn delete_order(&self, id: i32) -> DataResult<()> {
        transactional(&self.pool, move |tx| {
            Box::pin(async move {
                sqlx::query(r#"DELETE FROM "OrderProductMap" WHERE orderid = $1"#)
                    .bind(id)
                    .execute(tx.as_mut())
                    .await?;
                let result = sqlx::query("DELETE FROM orders WHERE id = $1")
                    .bind(id)
                    .execute(tx.as_mut())
                    .await?;
                if result.rows_affected() == 0 {
                    return Err(order_not_found(id));
                }
                Ok(())
            })
        })
        .await
    }

    async fn list_products(&self) -> DataResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, productname, productdescription FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    async fn delete_product(&self, id: i32) -> DataResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DataError::NotFound(format!("Product {id} not found")));
        }
        Ok(())
    }

    async fn ping(&self) -> DataResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
