//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use vitrine_store::{ContentStore, UploadSink};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Store backing the content document.
    pub(crate) store: Arc<dyn ContentStore>,
    /// Sink receiving uploaded image files.
    pub(crate) uploads: Arc<dyn UploadSink>,
    /// Shared token required on mutating routes when set.
    pub(crate) admin_token: Option<String>,
    /// Enable verbose output (log request details).
    pub(crate) verbose: bool,
}
