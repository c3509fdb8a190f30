use std::sync::Arc;

use crate::error::AppError;
use crate::models::{Order, OrderDetails, OrderRequest, OrderSummary, Product};
use crate::store::OrderStore;

/// Order operations over an injected [`OrderStore`].
///
/// Request bodies reach this layer already validated; the service trims the
/// description, delegates to the store and logs the outcome.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<OrderSummary>, AppError> {
        self.store.list_orders().await.map_err(|e| {
            tracing::error!(error = %e, "failed to list orders");
            AppError::from(e)
        })
    }

    pub async fn search(&self, term: &str) -> Result<Vec<OrderDetails>, AppError> {
        self.store.search_orders(term).await.map_err(|e| {
            tracing::error!(error = %e, term, "failed to search orders");
            AppError::from(e)
        })
    }

    pub async fn create(&self, request: OrderRequest) -> Result<Order, AppError> {
        let description = request.order_description.trim();
        match self
            .store
            .create_order(description, &request.product_ids)
            .await
        {
            Ok(order) => {
                tracing::info!(
                    order_id = order.id,
                    products = request.product_ids.len(),
                    "order created"
                );
                Ok(order)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    product_ids = ?request.product_ids,
                    "failed to create order"
                );
                Err(e.into())
            }
        }
    }

    pub async fn update(&self, id: i32, request: OrderRequest) -> Result<Order, AppError> {
        let description = request.order_description.trim();
        match self
            .store
            .update_order(id, description, &request.product_ids)
            .await
        {
            Ok(order) => {
                tracing::info!(
                    order_id = id,
                    products = request.product_ids.len(),
                    "order updated"
                );
                Ok(order)
            }
            Err(e) => {
                if e.is_not_found() {
                    tracing::debug!(order_id = id, "update of unknown order");
                } else {
                    tracing::error!(error = %e, order_id = id, "failed to update order");
                }
                Err(e.into())
            }
        }
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        match self.store.delete_order(id).await {
            Ok(()) => {
                tracing::info!(order_id = id, "order deleted");
                Ok(())
            }
            Err(e) => {
                if e.is_not_found() {
                    tracing::debug!(order_id = id, "delete of unknown order");
                } else {
                    tracing::error!(error = %e, order_id = id, "failed to delete order");
                }
                Err(e.into())
            }
        }
    }

    pub async fn products(&self) -> Result<Vec<Product>, AppError> {
        self.store.list_products().await.map_err(|e| {
            tracing::error!(error = %e, "failed to list products");
            AppError::from(e)
        })
    }
}
