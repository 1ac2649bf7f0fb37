//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower::ServiceBuilder;

use crate::ServerConfig;
use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `config` - Server configuration (static directories, body limit)
pub(crate) fn create_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    // API routes
    let api_routes = Router::new()
        .route(
            "/api/content",
            get(handlers::content::get_content).post(handlers::content::save_content),
        )
        .route(
            "/api/upload",
            post(handlers::upload::upload_file).layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        );

    let router = Router::new().merge(api_routes);

    // Uploaded images and frontend SPA
    let router = router.merge(static_files::static_router(
        &config.upload_public_prefix,
        &config.uploads_dir,
        &config.frontend_dir,
    ));

    // Add security headers middleware
    router
        .layer(
            ServiceBuilder::new()
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
