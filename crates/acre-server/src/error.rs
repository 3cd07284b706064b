//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use acre_core::forms::FormErrors;
use acre_db::error::DatabaseError;

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request: bad JSON, bad query string, unknown acting user.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// The record is still referenced by other rows.
    #[error("{0}")]
    Conflict(String),

    /// The submitted form did not validate.
    #[error("Validation failed: {0}")]
    Form(FormErrors),

    #[error("Internal server error")]
    Internal(String),
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { .. } | DatabaseError::PageNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            DatabaseError::Form(errors) => Self::Form(errors),
            DatabaseError::UnknownUser(_) => Self::BadRequest(err.to_string()),
            DatabaseError::Conflict(message) => Self::Conflict(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Form(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": errors }))).into_response()
            }
            Self::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
            other => {
                let status = match other {
                    Self::BadRequest(_) => StatusCode::BAD_REQUEST,
                    Self::NotFound(_) => StatusCode::NOT_FOUND,
                    _ => StatusCode::CONFLICT,
                };
                (status, Json(json!({ "error": other.to_string() }))).into_response()
            }
        }
    }
}

/// Errors that stop the server itself.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
