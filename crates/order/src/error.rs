//! Unified error handling for the order service.
//!
//! All route handlers return `Result<T, AppError>`; every error response has
//! the body `{"message": "..."}`. Upstream 4xx messages from auth-service and
//! inventory-service pass through unchanged, so the caller sees one contract
//! no matter which service said no.

use axum::{
    Json,
    extract::FromRequest,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::clients::{IdentityError, ReduceError};
use crate::services::orders::OrderError;
use crate::store::RepositoryError;

/// Application-level error type for the order service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Store(RepositoryError),

    /// Bearer-token resolution against auth-service failed.
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Stock decrement against inventory-service failed.
    #[error("Reduce error: {0}")]
    Reduce(#[from] ReduceError),

    /// Client sent an invalid request.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request lacked a usable bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message, stable across releases.
    pub message: String,
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("Order not found".to_owned()),
            other => Self::Store(other),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Reduce(err) => Self::Reduce(err),
            OrderError::Repository(err) => err.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with full detail; clients only see the generic message.
        if matches!(
            self,
            Self::Store(_)
                | Self::Identity(IdentityError::Failed(_) | IdentityError::Http(_))
                | Self::Reduce(ReduceError::Failed(_) | ReduceError::Http(_))
        ) {
            tracing::error!(error = %self, "Request error");
        }

        let (status, message) = match self {
            Self::Store(_)
            | Self::Identity(IdentityError::Failed(_) | IdentityError::Http(_))
            | Self::Reduce(ReduceError::Failed(_) | ReduceError::Http(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_owned(),
            ),
            Self::Identity(IdentityError::Unauthorized(message))
            | Self::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            Self::Reduce(ReduceError::Rejected(message)) | Self::Validation(message) => {
                (StatusCode::BAD_REQUEST, message)
            }
            Self::Reduce(ReduceError::NotFound(message)) | Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, message)
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// JSON extractor whose rejection follows the `{"message"}` contract instead
/// of axum's plain-text default.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
