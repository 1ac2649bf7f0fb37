//! Filesystem backends.
//!
//! [`FsContentStore`] keeps the site document as one JSON file and
//! replaces it atomically on save. [`FsUploadSink`] writes uploaded
//! binaries into a public directory under timestamped names.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;
use vitrine_content::SiteContent;

use crate::store::{ContentStore, StoreError, StoreErrorKind, UploadSink};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Content store backed by a single JSON file.
///
/// `save` writes to a fresh per-save temp file in the document's
/// directory and renames it over the target, so a failed or concurrent
/// write never corrupts the stored document.
pub struct FsContentStore {
    /// Path of the JSON document.
    path: PathBuf,
}

impl FsContentStore {
    /// Create a store for the document at `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the stored document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentStore for FsContentStore {
    fn load(&self) -> Result<SiteContent, StoreError> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::io(e, Some(self.path.clone())).with_backend(BACKEND))?;

        let content: SiteContent = serde_json::from_str(&raw).map_err(|e| {
            StoreError::new(StoreErrorKind::InvalidDocument)
                .with_path(&self.path)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        // A well-typed document can still carry duplicate ids or a
        // dangling cover image; never hand those to callers.
        content.validate().map_err(|e| {
            StoreError::invalid_document(e.to_string())
                .with_path(&self.path)
                .with_backend(BACKEND)
        })?;

        Ok(content)
    }

    fn save(&self, content: &SiteContent) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(content).map_err(|e| {
            StoreError::new(StoreErrorKind::InvalidDocument)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .map_err(|e| StoreError::io(e, Some(parent.to_path_buf())).with_backend(BACKEND))?;

        // Each save gets its own temp file; concurrent saves cannot
        // truncate each other's buffers before the rename, so the
        // document on disk is always one writer's complete output.
        let mut temp = NamedTempFile::new_in(parent)
            .map_err(|e| StoreError::io(e, Some(parent.to_path_buf())).with_backend(BACKEND))?;
        temp.write_all(json.as_bytes())
            .map_err(|e| StoreError::io(e, Some(parent.to_path_buf())).with_backend(BACKEND))?;
        temp.persist(&self.path)
            .map_err(|e| StoreError::io(e.error, Some(self.path.clone())).with_backend(BACKEND))?;

        tracing::debug!(path = %self.path.display(), "Content document saved");
        Ok(())
    }
}

/// Upload sink backed by a directory of public image files.
///
/// Files are stored as `{millis}-{original_name}`; when two uploads land
/// in the same millisecond with the same name, a counter is inserted
/// (`{millis}-1-{original_name}`, ...) so neither clobbers the other.
pub struct FsUploadSink {
    /// Directory receiving uploaded files.
    upload_dir: PathBuf,
    /// URL prefix under which the directory is served (e.g. "/portfolio").
    public_prefix: String,
}

impl FsUploadSink {
    /// Create a sink writing into `upload_dir`, served under `public_prefix`.
    #[must_use]
    pub fn new(upload_dir: PathBuf, public_prefix: impl Into<String>) -> Self {
        Self {
            upload_dir,
            public_prefix: public_prefix.into(),
        }
    }

    /// Reject file names that could escape the upload directory.
    fn validate_name(name: &str) -> Result<(), StoreError> {
        let path = Path::new(name);
        let is_plain_file = !name.is_empty()
            && path.components().count() == 1
            && matches!(path.components().next(), Some(Component::Normal(_)));

        if is_plain_file {
            Ok(())
        } else {
            Err(StoreError::new(StoreErrorKind::InvalidPath)
                .with_path(name)
                .with_backend(BACKEND))
        }
    }
}

impl UploadSink for FsUploadSink {
    fn store(&self, bytes: &[u8], original_name: &str) -> Result<String, StoreError> {
        Self::validate_name(original_name)?;

        fs::create_dir_all(&self.upload_dir)
            .map_err(|e| StoreError::io(e, Some(self.upload_dir.clone())).with_backend(BACKEND))?;

        // Per-upload temp file, renamed into place once complete, so an
        // interrupted write never leaves a half-written file under the
        // name we hand back.
        let mut temp = NamedTempFile::new_in(&self.upload_dir)
            .map_err(|e| StoreError::io(e, Some(self.upload_dir.clone())).with_backend(BACKEND))?;
        temp.write_all(bytes)
            .map_err(|e| StoreError::io(e, Some(self.upload_dir.clone())).with_backend(BACKEND))?;

        let millis = Utc::now().timestamp_millis();
        let mut filename = format!("{millis}-{original_name}");
        let mut counter = 0u32;
        loop {
            let target = self.upload_dir.join(&filename);
            // noclobber: a same-millisecond upload of the same name takes
            // the next counter slot instead of overwriting.
            match temp.persist_noclobber(&target) {
                Ok(_) => {
                    tracing::debug!(file = %target.display(), size = bytes.len(), "Upload stored");
                    return Ok(format!("{}/{filename}", self.public_prefix));
                }
                Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
                    temp = e.file;
                    counter += 1;
                    filename = format!("{millis}-{counter}-{original_name}");
                }
                Err(e) => {
                    return Err(StoreError::io(e.error, Some(target)).with_backend(BACKEND));
                }
            }
        }
    }
}
