//! Store traits and error type.

use std::path::PathBuf;

use vitrine_content::SiteContent;

/// Semantic error categories for store failures.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// The content document does not exist yet.
    NotFound,
    /// Permission denied by the backend.
    PermissionDenied,
    /// The stored document is not a valid `SiteContent` (malformed JSON
    /// or a structural invariant violation).
    InvalidDocument,
    /// Invalid path or file name (e.g. traversal components in an
    /// uploaded file name).
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Store error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StoreError {
    /// Semantic error category.
    pub kind: StoreErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g. "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a new store error.
    #[must_use]
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a store error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StoreErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StoreErrorKind::PermissionDenied,
            _ => StoreErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }

    /// Create an invalid-document error with a message.
    #[must_use]
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::InvalidDocument).with_source(DocumentError(message.into()))
    }
}

/// Message-only source for invalid-document errors.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct DocumentError(String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StoreErrorKind::NotFound => "Not found",
            StoreErrorKind::PermissionDenied => "Permission denied",
            StoreErrorKind::InvalidDocument => "Invalid document",
            StoreErrorKind::InvalidPath => "Invalid path",
            StoreErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// The durable JSON document holding the full site content.
///
/// There is no partial update: `load` returns the whole document and
/// `save` overwrites it verbatim. Concurrent writers are not
/// coordinated; the last save wins.
pub trait ContentStore: Send + Sync {
    /// Read and validate the full document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the document is missing, unreadable, or
    /// fails [`SiteContent::validate`](vitrine_content::SiteContent::validate).
    fn load(&self) -> Result<SiteContent, StoreError>;

    /// Overwrite the stored document with `content`.
    ///
    /// A failed save must leave the previously stored document intact.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the document cannot be written.
    fn save(&self, content: &SiteContent) -> Result<(), StoreError>;
}

/// Durable storage for uploaded image binaries.
pub trait UploadSink: Send + Sync {
    /// Store `bytes` under a generated unique name derived from
    /// `original_name` and return the public reference path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the name is invalid or the write fails.
    /// A failed store must not leave a partial file behind that the
    /// returned path could reference.
    fn store(&self, bytes: &[u8], original_name: &str) -> Result<String, StoreError>;
}
