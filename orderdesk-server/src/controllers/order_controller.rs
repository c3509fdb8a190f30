use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use orderdesk_core::Valid;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::{Order, OrderDetails, OrderRequest, OrderSummary};
use crate::services::OrderService;
use crate::state::AppState;

/// Routes under `/api` for listing, searching and editing orders.
///
/// | Method | Path            | Handler  |
/// |--------|-----------------|----------|
/// | GET    | `/order`        | `list`   |
/// | GET    | `/order/{term}` | `search` |
/// | POST   | `/orders`       | `create` |
/// | PUT    | `/orders/{id}`  | `update` |
/// | DELETE | `/orders/{id}`  | `delete` |
pub struct OrderController;

impl OrderController {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route("/order", get(list))
            .route("/order/{term}", get(search))
            .route("/orders", post(create))
            .route("/orders/{id}", put(update).delete(delete))
    }
}

/// Order id from the path; anything but an integer is a client error.
fn order_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, AppError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        AppError::Validation(format!("Invalid order id: {}", rejection.body_text()))
    })
}

async fn list(State(service): State<OrderService>) -> Result<Json<Vec<OrderSummary>>, AppError> {
    Ok(Json(service.list().await?))
}

async fn search(
    State(service): State<OrderService>,
    Path(term): Path<String>,
) -> Result<Json<Vec<OrderDetails>>, AppError> {
    Ok(Json(service.search(&term).await?))
}

async fn create(
    State(service): State<OrderService>,
    Valid(body): Valid<OrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = service.create(body).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn update(
    State(service): State<OrderService>,
    path: Result<Path<i32>, PathRejection>,
    Valid(body): Valid<OrderRequest>,
) -> Result<Json<Order>, AppError> {
    let id = order_id(path)?;
    Ok(Json(service.update(id, body).await?))
}

async fn delete(
    State(service): State<OrderService>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let id = order_id(path)?;
    service.delete(id).await?;
    Ok(Json(json!({ "message": "Order deleted successfully" })))
}
