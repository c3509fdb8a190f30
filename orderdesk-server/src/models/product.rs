use serde::{Deserialize, Serialize};

/// Catalog entry. Read-only through the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub productname: String,
    pub productdescription: Option<String>,
}

impl Product {
    pub fn new(id: i32, name: &str, description: &str) -> Self {
        Self {
            id,
            productname: name.to_string(),
            productdescription: Some(description.to_string()),
        }
    }
}

/// The fixed catalog, matching `migrations/0002_seed_products.sql`.
pub fn seed_catalog() -> Vec<Product> {
    vec![
        Product::new(1, "HP laptop", "This is HP laptop"),
        Product::new(2, "lenovo laptop", "This is lenovo"),
        Product::new(3, "Car", "This is Car"),
        Product::new(4, "Bike", "This is Bike"),
    ]
}
