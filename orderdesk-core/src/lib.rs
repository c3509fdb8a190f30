//! # orderdesk-core
//!
//! HTTP plumbing shared by the orderdesk crates: the JSON error type and its
//! response shape, the `Valid<T>` body extractor, layered configuration,
//! tower layers and the health endpoints.

pub mod config;
pub mod error;
pub mod health;
pub mod layers;
pub mod validation;

pub use config::{Config, ConfigError, ConfigValue, FromConfigValue};
pub use error::{error_chain, error_response, ErrorReport, HttpError};
pub use health::{health_routes, HealthIndicator, HealthStatus};
pub use layers::{
    catch_panic_layer, cors_for_origins, default_cors, default_trace, expose_error_details,
    init_tracing,
};
pub use validation::{not_blank, FieldError, Valid, ValidationErrorResponse};

/// Graceful shutdown future: resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
