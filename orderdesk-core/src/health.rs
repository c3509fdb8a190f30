//! Health endpoints with liveness/readiness probes.
//!
//! | Path               | Description                                 |
//! |--------------------|---------------------------------------------|
//! | `GET /health`      | Aggregated status, 200 if UP, 503 if DOWN   |
//! | `GET /health/live` | Liveness probe, always 200                  |
//! | `GET /health/ready`| Readiness probe, 200 if all checks pass     |

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

/// Result of a single health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Up,
    Down(String),
}

/// A named health indicator.
#[async_trait]
pub trait HealthIndicator: Send + Sync + 'static {
    /// The name of this health check (e.g. `"db"`).
    fn name(&self) -> &str;

    async fn check(&self) -> HealthStatus;
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthCheckStatus {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthCheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub duration_ms: u64,
}

/// Aggregated health response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthCheckStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<HealthCheck>,
    pub uptime_seconds: u64,
}

struct HealthState {
    checks: Vec<Arc<dyn HealthIndicator>>,
    start_time: Instant,
}

impl HealthState {
    async fn aggregate(&self) -> HealthResponse {
        let mut checks = Vec::with_capacity(self.checks.len());
        for indicator in &self.checks {
            let start = Instant::now();
            let status = indicator.check().await;
            let duration_ms = start.elapsed().as_millis() as u64;
            let (status, reason) = match status {
                HealthStatus::Up => (HealthCheckStatus::Up, None),
                HealthStatus::Down(reason) => {
                    tracing::warn!(check = indicator.name(), %reason, "health check failed");
                    (HealthCheckStatus::Down, Some(reason))
                }
            };
            checks.push(HealthCheck {
                name: indicator.name().to_string(),
                status,
                reason,
                duration_ms,
            });
        }

        let all_up = checks.iter().all(|c| c.status == HealthCheckStatus::Up);
        HealthResponse {
            status: if all_up {
                HealthCheckStatus::Up
            } else {
                HealthCheckStatus::Down
            },
            checks,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

/// Build the `/health` routes over the given indicators.
pub fn health_routes<S>(checks: Vec<Arc<dyn HealthIndicator>>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let state = Arc::new(HealthState {
        checks,
        start_time: Instant::now(),
    });
    Router::new()
        .route("/health", get(health_handler))
        .route("/health/ready", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let response = state.aggregate().await;
    let status_code = match response.status {
        HealthCheckStatus::Up => StatusCode::OK,
        HealthCheckStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status_code, Json(response))
}

async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
