//! Server error types.
//!
//! Maps store and edit errors onto HTTP status codes with JSON error
//! bodies of the shape `{ "error": "..." }`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vitrine_store::{StoreError, StoreErrorKind};

/// Error type for request handlers.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Upload request carried no `file` field.
    #[error("No file provided")]
    MissingFile,
    /// Request body could not be read as multipart.
    #[error("Invalid multipart request: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
    /// Submitted document failed validation.
    #[error("Invalid content document: {0}")]
    InvalidDocument(String),
    /// Mutating route called without a matching admin token.
    #[error("Invalid or missing admin token")]
    Unauthorized,
    /// Store backend failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServerError {
    /// HTTP status code for this error.
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingFile | Self::Multipart(_) | Self::InvalidDocument(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Store(err) => match err.kind {
                StoreErrorKind::NotFound => StatusCode::NOT_FOUND,
                StoreErrorKind::InvalidDocument | StoreErrorKind::InvalidPath => {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
