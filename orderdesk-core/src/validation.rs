use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::HttpError;

/// A field-level validation error.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// Container for validation errors, used as the payload of `HttpError::Validation`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

impl ValidationErrorResponse {
    pub fn from_report(report: &garde::Report) -> Self {
        let errors = report
            .iter()
            .map(|(path, error)| {
                let mut field = path.to_string();
                if field.is_empty() {
                    field = "value".to_string();
                }
                FieldError {
                    field,
                    message: error.message().to_string(),
                    code: "validation".to_string(),
                }
            })
            .collect();
        Self { errors }
    }
}

/// JSON body extractor that runs `garde` validation after deserializing.
///
/// Malformed bodies are rejected with `400` and the serde message; bodies
/// that parse but fail validation are rejected with `400` and per-field
/// details.
///
/// ```ignore
/// async fn create(Valid(body): Valid<CreateOrderRequest>) -> Result<Json<Order>, AppError> {
///     // body has already passed validation here
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Valid<T>(pub T);

impl<T, S> FromRequest<S> for Valid<T>
where
    T: DeserializeOwned + garde::Validate + Send,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;
        value.validate().map_err(|report| {
            HttpError::Validation(ValidationErrorResponse::from_report(&report))
        })?;
        Ok(Valid(value))
    }
}

/// `garde` custom rule: the string must contain something other than whitespace.
pub fn not_blank(value: &str, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("must not be blank"));
    }
    Ok(())
}

// Re-export garde::Validate for convenience.
pub use garde::Validate;
