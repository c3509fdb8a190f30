use axum::response::{IntoResponse, Response};
use orderdesk_core::HttpError;
use orderdesk_data::DataError;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Validation(String),
    Store(DataError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let http = match self {
            AppError::NotFound(msg) => HttpError::NotFound(msg),
            AppError::Validation(msg) => HttpError::BadRequest(msg),
            AppError::Store(err) => HttpError::from(err),
        };
        http.into_response()
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound(msg) => AppError::NotFound(msg),
            other => AppError::Store(other),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "{msg}"),
            AppError::Validation(msg) => write!(f, "{msg}"),
            AppError::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Store(err) => std::error::Error::source(err),
            _ => None,
        }
    }
}
