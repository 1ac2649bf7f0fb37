//! Mock backends for testing.
//!
//! In-memory stand-ins for the filesystem backends. Both carry a
//! fail-next switch so error paths (failed save, failed upload) can be
//! exercised without a broken filesystem.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use vitrine_content::SiteContent;

use crate::store::{ContentStore, StoreError, StoreErrorKind, UploadSink};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory content store for testing.
///
/// # Example
///
/// ```
/// use vitrine_content::SiteContent;
/// use vitrine_store::{ContentStore, MockContentStore};
///
/// let store = MockContentStore::new().with_document(SiteContent::seed());
/// let content = store.load().unwrap();
/// store.save(&content.add_project()).unwrap();
/// assert_eq!(store.save_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockContentStore {
    document: RwLock<Option<SiteContent>>,
    fail_next_save: AtomicBool,
    saves: AtomicUsize,
}

impl MockContentStore {
    /// Create an empty mock store (loads fail with `NotFound`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, content: SiteContent) -> Self {
        *self.document.write().unwrap() = Some(content);
        self
    }

    /// Make the next `save` call fail with an `Other` error.
    pub fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// The currently stored document, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn document(&self) -> Option<SiteContent> {
        self.document.read().unwrap().clone()
    }
}

impl ContentStore for MockContentStore {
    fn load(&self) -> Result<SiteContent, StoreError> {
        self.document
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| StoreError::new(StoreErrorKind::NotFound).with_backend(BACKEND))
    }

    fn save(&self, content: &SiteContent) -> Result<(), StoreError> {
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(StoreError::new(StoreErrorKind::Other).with_backend(BACKEND));
        }
        *self.document.write().unwrap() = Some(content.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory upload sink for testing.
///
/// Stored files are kept as `(public path, bytes)` pairs; paths are
/// `{prefix}/{n}-{original_name}` with a running counter instead of a
/// timestamp, so tests get deterministic names.
#[derive(Debug)]
pub struct MockUploadSink {
    public_prefix: String,
    files: RwLock<Vec<(String, Vec<u8>)>>,
    fail_next_store: AtomicBool,
}

impl Default for MockUploadSink {
    fn default() -> Self {
        Self {
            public_prefix: "/portfolio".to_owned(),
            files: RwLock::new(Vec::new()),
            fail_next_store: AtomicBool::new(false),
        }
    }
}

impl MockUploadSink {
    /// Create a sink with the default `/portfolio` prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `store` call fail with an `Other` error.
    pub fn fail_next_store(&self) {
        self.fail_next_store.store(true, Ordering::SeqCst);
    }

    /// All stored files as `(public path, bytes)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn files(&self) -> Vec<(String, Vec<u8>)> {
        self.files.read().unwrap().clone()
    }
}

impl UploadSink for MockUploadSink {
    fn store(&self, bytes: &[u8], original_name: &str) -> Result<String, StoreError> {
        if self.fail_next_store.swap(false, Ordering::SeqCst) {
            return Err(StoreError::new(StoreErrorKind::Other).with_backend(BACKEND));
        }
        if original_name.is_empty() || original_name.contains('/') {
            return Err(StoreError::new(StoreErrorKind::InvalidPath)
                .with_path(original_name)
                .with_backend(BACKEND));
        }
        let mut files = self.files.write().unwrap();
        let path = format!("{}/{}-{original_name}", self.public_prefix, files.len());
        files.push((path.clone(), bytes.to_vec()));
        Ok(path)
    }
}
