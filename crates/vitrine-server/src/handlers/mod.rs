//! HTTP request handlers.

pub(crate) mod content;
pub(crate) mod upload;

use axum::http::HeaderMap;

use crate::error::ServerError;
use crate::state::AppState;

/// Header carrying the shared admin token on mutating requests.
const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Check the admin token on a mutating request.
///
/// A no-op when no token is configured. This gates the admin UI, it is
/// not access control; see the crate docs.
pub(crate) fn check_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ServerError> {
    let Some(expected) = &state.admin_token else {
        return Ok(());
    };

    let provided = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    if provided == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(ServerError::Unauthorized)
    }
}
