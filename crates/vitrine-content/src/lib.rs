//! Content model for the vitrine site engine.
//!
//! This crate holds the editable site document ([`SiteContent`]) and the
//! pure edit operations the admin surface applies to it. Every operation
//! takes the current tree by reference and returns a new tree; the input
//! is never mutated, so callers keep cheap structural change detection
//! and can discard a failed edit without rollback logic.
//!
//! The document is persisted as a single JSON file with camelCase keys
//! (`backgroundImages`, `mainImage`); see [`SiteContent`] for the shape.
//!
//! # Example
//!
//! ```
//! use vitrine_content::{HeroField, SiteContent};
//!
//! let content = SiteContent::seed();
//! let updated = content.set_hero_field(HeroField::Title, "Fine Renovations");
//!
//! assert_eq!(updated.hero.title, "Fine Renovations");
//! assert_ne!(content.hero.title, updated.hero.title);
//! ```

mod edit;
mod error;
mod model;

pub use edit::{ContactField, HeroField, ProjectField};
pub use error::EditError;
pub use model::{About, Contact, Hero, Project, Quality, SiteContent};
