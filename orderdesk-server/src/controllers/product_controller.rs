use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppError;
use crate::models::Product;
use crate::services::OrderService;
use crate::state::AppState;

/// Read-only catalog under `/api/products`.
pub struct ProductController;

impl ProductController {
    pub fn routes() -> Router<AppState> {
        Router::new().route("/products", get(list))
    }
}

async fn list(State(service): State<OrderService>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(service.products().await?))
}
