//! In-process HTTP testing for orderdesk routers.
//!
//! ```ignore
//! let app = TestApp::new(router);
//! app.post("/api/orders")
//!     .json(&json!({ "orderDescription": "Laptop bundle", "productIds": [1, 2] }))
//!     .send()
//!     .await
//!     .assert_created()
//!     .assert_json_path("orderdescription", "Laptop bundle");
//! ```

mod app;

pub use app::{resolve_path, TestApp, TestRequest, TestResponse};
