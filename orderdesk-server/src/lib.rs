//! # orderdesk-server
//!
//! Order management REST API. Orders reference a fixed product catalog
//! through the `OrderProductMap` join table; every change to an order and its
//! links is applied atomically.
//!
//! [`build_app`] assembles the router around an [`AppState`], so tests can
//! drive the full HTTP surface against a [`store::MemoryOrderStore`].

pub mod controllers;
pub mod error;
pub mod models;
pub mod services;
pub mod settings;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::{middleware, Router};
use orderdesk_core::{
    catch_panic_layer, cors_for_origins, default_cors, default_trace, expose_error_details,
    health_routes, HealthIndicator,
};

use controllers::{OrderController, ProductController};
use settings::Settings;
pub use state::AppState;
use store::StoreHealth;

/// Build the application router: `/api` routes, health endpoints and the
/// tower layer stack.
///
/// Outside production, 500 responses carry the error's source chain under
/// `details`. CORS is restricted to the configured origins in production and
/// permissive otherwise.
pub fn build_app(state: AppState, settings: &Settings) -> Router {
    let health: Vec<Arc<dyn HealthIndicator>> =
        vec![Arc::new(StoreHealth::new(state.store.clone()))];

    let api = Router::new()
        .merge(OrderController::routes())
        .merge(ProductController::routes());

    let mut app = Router::new()
        .nest("/api", api)
        .merge(health_routes(health))
        .with_state(state);

    if !settings.production {
        app = app.layer(middleware::from_fn(expose_error_details));
    }

    let cors = if settings.production {
        cors_for_origins(&settings.cors_origins)
    } else {
        default_cors()
    };

    app.layer(catch_panic_layer())
        .layer(cors)
        .layer(default_trace())
}
