pub mod order_controller;
pub mod product_controller;

pub use order_controller::OrderController;
pub use product_controller::ProductController;
