//! Content document API endpoints.
//!
//! The document is read and replaced wholesale; there is no partial
//! update verb. The admin frontend sends the full edited tree back.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use serde_json::json;
use vitrine_content::SiteContent;

use crate::error::ServerError;
use crate::handlers::check_admin;
use crate::state::AppState;

/// Handle GET /api/content.
///
/// Returns the full content document as JSON.
pub(crate) async fn get_content(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse + std::fmt::Debug, ServerError> {
    let content = state.store.load()?;
    Ok(Json(content))
}

/// Handle POST /api/content.
///
/// Replaces the stored document with the request body. The document is
/// validated before the save; an invalid tree never reaches disk.
pub(crate) async fn save_content(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(content): Json<SiteContent>,
) -> Result<impl IntoResponse + std::fmt::Debug, ServerError> {
    check_admin(&state, &headers)?;

    content
        .validate()
        .map_err(|err| ServerError::InvalidDocument(err.to_string()))?;

    state.store.save(&content)?;

    if state.verbose {
        tracing::info!(
            projects = content.projects.len(),
            backgrounds = content.hero.background_images.len(),
            "Content document saved"
        );
    }

    Ok(Json(json!({ "status": "ok" })))
}
