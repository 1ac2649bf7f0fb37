//! Static file serving.
//!
//! Serves uploaded images under the public upload prefix and the built
//! frontend with SPA fallback to `index.html`, both via tower-http's
//! `ServeDir`.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Create router for static file serving.
///
/// Uploaded files are nested under `upload_prefix` (e.g. `/portfolio`).
/// Everything that matches neither an API route nor an upload falls
/// through to the frontend directory, with `index.html` served for
/// client-side routes.
pub(crate) fn static_router(
    upload_prefix: &str,
    uploads_dir: &Path,
    frontend_dir: &Path,
) -> Router<Arc<AppState>> {
    let frontend =
        ServeDir::new(frontend_dir).fallback(ServeFile::new(frontend_dir.join("index.html")));

    Router::new()
        .nest_service(upload_prefix, ServeDir::new(uploads_dir))
        .fallback_service(frontend)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_static_router_construction() {
        let _router: Router<Arc<AppState>> = static_router(
            "/portfolio",
            &PathBuf::from("/tmp/uploads"),
            &PathBuf::from("/tmp/frontend"),
        );
    }
}
