use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use orderdesk_data::{DataError, DataResult};
use tokio::sync::RwLock;

use super::OrderStore;
use crate::models::{seed_catalog, Order, OrderDetails, OrderSummary, Product};

struct Link {
    order_id: i32,
    product_id: i32,
}

#[derive(Default)]
struct Tables {
    orders: BTreeMap<i32, Order>,
    products: BTreeMap<i32, Product>,
    links: Vec<Link>,
    next_order_id: i32,
}

impl Tables {
    /// Checks every product id before anything is written, so a bad id leaves
    /// the tables untouched.
    fn check_products(&self, product_ids: &[i32]) -> DataResult<()> {
        let missing = product_ids
            .iter()
            .find(|id| !self.products.contains_key(*id));
        match missing {
            Some(id) => Err(DataError::Other(format!(
                "insert on \"OrderProductMap\" violates foreign key: product {id} does not exist"
            ))),
            None => Ok(()),
        }
    }

    fn insert_links(&mut self, order_id: i32, product_ids: &[i32]) {
        for &product_id in product_ids {
            self.links.push(Link {
                order_id,
                product_id,
            });
        }
    }

    fn products_of(&self, order_id: i32) -> Vec<Product> {
        self.links
            .iter()
            .filter(|l| l.order_id == order_id)
            .filter_map(|l| self.products.get(&l.product_id).cloned())
            .collect()
    }
}

/// [`OrderStore`] kept in process memory.
///
/// Mirrors the PostgreSQL schema: foreign keys are checked, deletes cascade,
/// ids are assigned in increasing order. Each operation holds the write lock
/// for its whole duration, which makes it atomic.
#[derive(Clone, Default)]
pub struct MemoryOrderStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryOrderStore {
    /// An empty store with no catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the standard four-product catalog.
    pub fn seeded() -> Self {
        Self::with_products(seed_catalog())
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let tables = Tables {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            ..Tables::default()
        };
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Number of link rows held for `order_id`.
    pub async fn link_count(&self, order_id: i32) -> usize {
        self.tables
            .read()
            .await
            .links
            .iter()
            .filter(|l| l.order_id == order_id)
            .count()
    }
}

fn order_not_found(id: i32) -> DataError {
    DataError::NotFound(format!("Order {id} not found"))
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn list_orders(&self) -> DataResult<Vec<OrderSummary>> {
        let tables = self.tables.read().await;
        let summaries = tables
            .orders
            .values()
            .rev()
            .map(|order| {
                let distinct: BTreeSet<i32> = tables
                    .links
                    .iter()
                    .filter(|l| l.order_id == order.id)
                    .map(|l| l.product_id)
                    .collect();
                OrderSummary {
                    id: order.id,
                    orderdescription: order.orderdescription.clone(),
                    createdat: order.createdat,
                    countofproducts: distinct.len() as i64,
                }
            })
            .collect();
        Ok(summaries)
    }

    async fn search_orders(&self, term: &str) -> DataResult<Vec<OrderDetails>> {
        let tables = self.tables.read().await;
        let needle = term.to_lowercase();
        let matches = tables
            .orders
            .values()
            .rev()
            .filter(|o| {
                o.id.to_string() == term || o.orderdescription.to_lowercase().contains(&needle)
            })
            .map(|o| OrderDetails {
                id: o.id,
                orderdescription: o.orderdescription.clone(),
                createdat: o.createdat,
                products: tables.products_of(o.id),
            })
            .collect();
        Ok(matches)
    }

    async fn create_order(&self, description: &str, product_ids: &[i32]) -> DataResult<Order> {
        let mut tables = self.tables.write().await;
        tables.check_products(product_ids)?;

        tables.next_order_id += 1;
        let order = Order {
            id: tables.next_order_id,
            orderdescription: description.to_string(),
            createdat: Utc::now().naive_utc(),
        };
        tables.orders.insert(order.id, order.clone());
        tables.insert_links(order.id, product_ids);
        Ok(order)
    }

    async fn update_order(
        &self,
        id: i32,
        description: &str,
        product_ids: &[i32],
    ) -> DataResult<Order> {
        let mut tables = self.tables.write().await;
        if !tables.orders.contains_key(&id) {
            return Err(order_not_found(id));
        }
        tables.check_products(product_ids)?;

        tables.links.retain(|l| l.order_id != id);
        tables.insert_links(id, product_ids);
        let order = tables
            .orders
            .get_mut(&id)
            .ok_or_else(|| order_not_found(id))?;
        order.orderdescription = description.to_string();
        Ok(order.clone())
    }

    async fn delete_order(&self, id: i32) -> DataResult<()> {
        let mut tables = self.tables.write().await;
        if tables.orders.remove(&id).is_none() {
            return Err(order_not_found(id));
        }
        tables.links.retain(|l| l.order_id != id);
        Ok(())
    }

    async fn list_products(&self) -> DataResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.values().cloned().collect())
    }

    async fn delete_product(&self, id: i32) -> DataResult<()> {
        let mut tables = self.tables.write().await;
        if tables.products.remove(&id).is_none() {
            return Err(DataError::NotFound(format!("Product {id} not found")));
        }
        tables.links.retain(|l| l.product_id != id);
        Ok(())
    }

    async fn ping(&self) -> DataResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn links_keep_insertion_order() {
        let store = MemoryOrderStore::seeded();
        let order = store.create_order("bundle", &[4, 1, 3]).await.unwrap();
        let found = store.search_orders(&order.id.to_string()).await.unwrap();
        let ids: Vec<i32> = found[0].products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 1, 3]);
    }

    #[tokio::test]
    async fn order_ids_increase() {
        let store = MemoryOrderStore::seeded();
        let a = store.create_order("a", &[1]).await.unwrap();
        let b = store.create_order("b", &[1]).await.unwrap();
        assert!(b.id > a.id);
    }
}
