pub mod order;
pub mod product;

pub use order::{Order, OrderDetails, OrderRequest, OrderSummary};
pub use product::{seed_catalog, Product};
