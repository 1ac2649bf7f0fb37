//! HTTP server for the vitrine content engine.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - API endpoints for reading and replacing the site content document
//! - A multipart upload endpoint for portfolio images
//! - Static files for the admin/public frontend SPA and uploaded images
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use vitrine_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 7070,
//!         content_file: PathBuf::from("data/content.json"),
//!         seed_content: false,
//!         uploads_dir: PathBuf::from("public/portfolio"),
//!         upload_public_prefix: "/portfolio".to_string(),
//!         max_upload_bytes: 10 * 1024 * 1024,
//!         frontend_dir: PathBuf::from("frontend/dist"),
//!         admin_token: None,
//!         verbose: false,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► Rust axum server (vitrine-server)
//!                        │
//!                        ├─► API routes (Rust handlers)
//!                        │       │
//!                        │       └─► ContentStore / UploadSink (vitrine-store)
//!                        │
//!                        └─► Static files (tower-http ServeDir)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use state::AppState;
use vitrine_content::SiteContent;
use vitrine_store::{ContentStore, FsContentStore, FsUploadSink, UploadSink};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Path of the JSON content document.
    pub content_file: PathBuf,
    /// Write the seed document on startup when the content file is missing.
    pub seed_content: bool,
    /// Directory receiving uploaded image files.
    pub uploads_dir: PathBuf,
    /// URL prefix under which uploaded files are served.
    pub upload_public_prefix: String,
    /// Request body limit for the upload endpoint.
    pub max_upload_bytes: usize,
    /// Directory holding the built frontend SPA.
    pub frontend_dir: PathBuf,
    /// Shared token required on mutating routes when set.
    ///
    /// This is a UI gate inherited from the admin panel, not an access
    /// control mechanism; put real authentication in front of the server
    /// if the admin routes are exposed.
    pub admin_token: Option<String>,
    /// Enable verbose output.
    pub verbose: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7070,
            content_file: PathBuf::from("data/content.json"),
            seed_content: false,
            uploads_dir: PathBuf::from("public/portfolio"),
            upload_public_prefix: "/portfolio".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            frontend_dir: PathBuf::from("frontend/dist"),
            admin_token: None,
            verbose: false,
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Create shared storage backends
    let store: Arc<dyn ContentStore> = Arc::new(FsContentStore::new(config.content_file.clone()));
    let uploads: Arc<dyn UploadSink> = Arc::new(FsUploadSink::new(
        config.uploads_dir.clone(),
        &config.upload_public_prefix,
    ));

    if config.seed_content && !config.content_file.exists() {
        tracing::info!(path = %config.content_file.display(), "Seeding content document");
        store.save(&SiteContent::seed())?;
    }

    // Create app state
    let state = Arc::new(AppState {
        store,
        uploads,
        admin_token: config.admin_token.clone(),
        verbose: config.verbose,
    });

    // Create router
    let app = app::create_router(state, &config);

    // Bind and run server
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from vitrine config.
///
/// # Arguments
///
/// * `config` - vitrine configuration
/// * `verbose` - Enable verbose output
#[must_use]
pub fn server_config_from_config(config: &vitrine_config::Config, verbose: bool) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        content_file: config.content_resolved.file.clone(),
        seed_content: config.content_resolved.seed,
        uploads_dir: config.uploads_resolved.dir.clone(),
        upload_public_prefix: config.uploads_resolved.public_prefix.clone(),
        max_upload_bytes: config.uploads_resolved.max_upload_bytes,
        frontend_dir: config.frontend_resolved.dir.clone(),
        admin_token: config.admin.token.clone(),
        verbose,
    }
}
