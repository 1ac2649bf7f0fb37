//! Image upload endpoint.
//!
//! Accepts a multipart form with a single `file` field and stores the
//! bytes through the configured [`UploadSink`](vitrine_store::UploadSink).
//! The response carries the public path the admin frontend inserts into
//! the content document; storing a file never touches the document
//! itself.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use serde_json::json;

use crate::error::ServerError;
use crate::handlers::check_admin;
use crate::state::AppState;

/// Handle POST /api/upload.
pub(crate) async fn upload_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ServerError> {
    check_admin(&state, &headers)?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_owned();
        let bytes = field.bytes().await?;

        let path = state.uploads.store(&bytes, &original_name)?;
        tracing::info!(path = %path, size = bytes.len(), "Stored uploaded file");

        return Ok(Json(json!({ "path": path })));
    }

    Err(ServerError::MissingFile)
}
