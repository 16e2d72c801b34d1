//! Handler error type and its HTTP mapping.
//!
//! Client errors answer with the bare status text. Store failures are logged
//! and answered with a generic 500 so no internal detail reaches the client.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::routing::InvalidId;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed { allow: &'static str },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<InvalidId> for AppError {
    fn from(_: InvalidId) -> Self {
        AppError::NotFound
    }
}

fn status_text(status: StatusCode) -> String {
    format!("{}\n", status.canonical_reason().unwrap_or("Error"))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, status_text(StatusCode::NOT_FOUND)).into_response()
            }
            AppError::MethodNotAllowed { allow } => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, allow)],
                status_text(StatusCode::METHOD_NOT_ALLOWED),
            )
                .into_response(),
            AppError::BadRequest(reason) => {
                tracing::debug!(reason = %reason, "Rejected request");
                (StatusCode::BAD_REQUEST, status_text(StatusCode::BAD_REQUEST)).into_response()
            }
            AppError::Store(e) => {
                tracing::error!(error = %e, "Snippet store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    status_text(StatusCode::INTERNAL_SERVER_ERROR),
                )
                    .into_response()
            }
        }
    }
}
