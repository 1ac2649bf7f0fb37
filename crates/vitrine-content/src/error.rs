//! Edit operation errors.

/// Error returned by edit operations and document validation.
///
/// The admin panel this document backs used to swallow misses silently
/// (an edit naming a missing project just returned the tree unchanged).
/// Here a miss is an explicit error so callers can tell "nothing to do"
/// from "the target is gone".
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// No project with the given id exists.
    #[error("project {0} does not exist")]
    ProjectNotFound(u32),

    /// Image index is out of range for the project's gallery.
    #[error("image index {index} out of range for project {project}")]
    ImageIndexOutOfRange {
        /// Project id the edit targeted.
        project: u32,
        /// Requested gallery index.
        index: usize,
    },

    /// Background image index is out of range.
    #[error("background image index {0} out of range")]
    BackgroundIndexOutOfRange(usize),

    /// Path passed to `set_main_image` is not part of the project's gallery.
    #[error("image {path:?} is not part of project {project}")]
    UnknownImage {
        /// Project id the edit targeted.
        project: u32,
        /// The rejected path.
        path: String,
    },

    /// Document violates a structural invariant.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}
