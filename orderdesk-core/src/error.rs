use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::validation::ValidationErrorResponse;

/// Helper to create a JSON error response with a standard `{ "error": message }` body.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, Json(body)).into_response()
}

/// Diagnostic payload attached to a 5xx response as a response extension.
///
/// The public body only ever carries `message`. The
/// [`expose_error_details`](crate::layers::expose_error_details) layer, when
/// installed, rewrites the body to also include `details`.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub message: String,
    pub details: String,
}

impl ErrorReport {
    /// Build a report from an error, rendering its whole `source()` chain.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self {
            message: err.to_string(),
            details: error_chain(err),
        }
    }
}

/// Render an error and its sources, one cause per line.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str("\ncaused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

pub enum HttpError {
    NotFound(String),
    BadRequest(String),
    Server(ErrorReport),
    Validation(ValidationErrorResponse),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            HttpError::Validation(resp) => {
                let body = serde_json::json!({
                    "error": "Validation failed",
                    "details": resp.errors,
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            HttpError::Server(report) => {
                let mut response =
                    error_response(StatusCode::INTERNAL_SERVER_ERROR, report.message.clone());
                response.extensions_mut().insert(report);
                response
            }
            HttpError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
            HttpError::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            HttpError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            HttpError::Server(report) => write!(f, "Internal Error: {}", report.message),
            HttpError::Validation(resp) => {
                write!(f, "Validation Error: {} errors", resp.errors.len())
            }
        }
    }
}

impl std::fmt::Debug for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for HttpError {}
