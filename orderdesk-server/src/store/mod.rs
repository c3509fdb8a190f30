//! Persistence for orders and their product links.
//!
//! [`OrderStore`] is the seam between the HTTP layer and the database. The
//! application state holds an `Arc<dyn OrderStore>` built once at startup:
//! [`PgOrderStore`] in production, [`MemoryOrderStore`] in tests and when
//! `database.url` is `memory`.
//!
//! Every mutation is atomic: creating an order and its links, replacing the
//! links on update, and deleting an order with its links each either fully
//! apply or leave the store unchanged.

mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use orderdesk_core::{HealthIndicator, HealthStatus};
use orderdesk_data::DataResult;

use crate::models::{Order, OrderDetails, OrderSummary, Product};

pub use memory::MemoryOrderStore;
pub use postgres::PgOrderStore;

#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    /// All orders, newest first, with their distinct product counts.
    async fn list_orders(&self) -> DataResult<Vec<OrderSummary>>;

    /// Orders whose id equals `term` as text, or whose description contains
    /// `term` case-insensitively. An empty result is not an error.
    async fn search_orders(&self, term: &str) -> DataResult<Vec<OrderDetails>>;

    /// Insert an order and one link per product id, atomically.
    ///
    /// An unknown product id fails the whole operation.
    async fn create_order(&self, description: &str, product_ids: &[i32]) -> DataResult<Order>;

    /// Replace the description and the full set of links, atomically.
    ///
    /// Returns `DataError::NotFound` and changes nothing when `id` is absent.
    async fn update_order(
        &self,
        id: i32,
        description: &str,
        product_ids: &[i32],
    ) -> DataResult<Order>;

    /// Delete an order and its links, atomically.
    ///
    /// Returns `DataError::NotFound` and changes nothing when `id` is absent.
    async fn delete_order(&self, id: i32) -> DataResult<()>;

    async fn list_products(&self) -> DataResult<Vec<Product>>;

    /// Remove a catalog entry; links referencing it go with it.
    async fn delete_product(&self, id: i32) -> DataResult<()>;

    /// Round-trip to the backing store.
    async fn ping(&self) -> DataResult<()>;
}

/// Build the `LIKE` pattern for a substring search on `term`.
///
/// `%`, `_` and `\` in the term are escaped so they match literally.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Readiness check backed by [`OrderStore::ping`].
pub struct StoreHealth {
    store: Arc<dyn OrderStore>,
}

impl StoreHealth {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HealthIndicator for StoreHealth {
    fn name(&self) -> &str {
        "db"
    }

    async fn check(&self) -> HealthStatus {
        match self.store.ping().await {
            Ok(()) => HealthStatus::Up,
            Err(e) => HealthStatus::Down(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn wraps_term_in_wildcards() {
        assert_eq!(like_pattern("laptop"), "%laptop%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\tmp"), "%c:\\\\tmp%");
    }
}
