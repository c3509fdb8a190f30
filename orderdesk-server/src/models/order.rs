use chrono::NaiveDateTime;
use garde::Validate;
use orderdesk_core::not_blank;
use serde::{Deserialize, Serialize};

use super::Product;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i32,
    pub orderdescription: String,
    pub createdat: NaiveDateTime,
}

/// Row of the order listing: an order plus its distinct product count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderSummary {
    pub id: i32,
    pub orderdescription: String,
    pub createdat: NaiveDateTime,
    pub countofproducts: i64,
}

/// Search result: an order with its linked products, one entry per order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub id: i32,
    pub orderdescription: String,
    pub createdat: NaiveDateTime,
    pub products: Vec<Product>,
}

/// Body of `POST /api/orders` and `PUT /api/orders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[garde(custom(not_blank))]
    #[serde(default)]
    pub order_description: String,
    #[garde(length(min = 1))]
    #[serde(default)]
    pub product_ids: Vec<i32>,
}
