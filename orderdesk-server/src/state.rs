use std::sync::Arc;

use axum::extract::FromRef;

use crate::services::OrderService;
use crate::store::OrderStore;

/// Shared application state, built once at startup around the chosen store.
#[derive(Clone)]
pub struct AppState {
    pub order_service: OrderService,
    pub store: Arc<dyn OrderStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self {
            order_service: OrderService::new(store.clone()),
            store,
        }
    }
}

impl FromRef<AppState> for OrderService {
    fn from_ref(state: &AppState) -> Self {
        state.order_service.clone()
    }
}
