//! Persistence layer for the vitrine site engine.
//!
//! This crate abstracts the two durable collaborators of the content
//! model behind traits, so the core and the HTTP surface are testable
//! without a filesystem:
//!
//! - [`ContentStore`]: the single JSON document holding [`SiteContent`],
//!   read in full and overwritten wholesale on save (no merge, no diff,
//!   last writer wins).
//! - [`UploadSink`]: durable storage receiving uploaded image binaries
//!   under generated unique names, returning a public reference path.
//!
//! [`FsContentStore`] and [`FsUploadSink`] are the filesystem backends;
//! [`MockContentStore`] and [`MockUploadSink`] (behind the `mock`
//! feature) keep everything in memory for tests.
//!
//! [`EditorSession`] ties a loaded tree to its store for one editing
//! session: edits and saves go through the same tree reference, so an
//! edit applied before a save is always part of that save's snapshot.
//!
//! [`SiteContent`]: vitrine_content::SiteContent

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod session;
mod store;

pub use fs::{FsContentStore, FsUploadSink};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockContentStore, MockUploadSink};
pub use session::EditorSession;
pub use store::{ContentStore, StoreError, StoreErrorKind, UploadSink};
