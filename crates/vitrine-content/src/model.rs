//! The site document.
//!
//! One aggregate root, [`SiteContent`], persisted as a single JSON file
//! and overwritten wholesale on every save. There is no per-field
//! persistence and no versioning; the last writer wins.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// The full editable document describing the site's text and images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    /// Hero section (title, subtitle, rotating background images).
    pub hero: Hero,
    /// Portfolio entries in display order.
    pub projects: Vec<Project>,
    /// Quality pitch section.
    pub quality: Quality,
    /// About section.
    pub about: About,
    /// Contact details.
    pub contact: Contact,
}

/// Hero section content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    /// Rotation order is display order; the first image is shown first.
    pub background_images: Vec<String>,
}

/// One portfolio entry with a gallery of images, one of which is primary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique within `SiteContent::projects`. Assigned as max(ids, 0) + 1.
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Gallery paths in thumbnail display order.
    pub images: Vec<String>,
    /// Cover image shown in the portfolio grid. Either empty or a
    /// member of `images`.
    pub main_image: String,
}

/// Quality pitch section content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quality {
    pub title: String,
    pub description: String,
    pub image: String,
}

/// About section content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct About {
    pub description: String,
}

/// Contact details. Free-form strings; no format validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub instagram: String,
    pub facebook: String,
}

impl SiteContent {
    /// Placeholder document for a fresh site.
    ///
    /// Used by `vitrine init` to create the content file.
    #[must_use]
    pub fn seed() -> Self {
        Self {
            hero: Hero {
                title: "Your Business Name".to_owned(),
                subtitle: "What you do, in one line".to_owned(),
                description: "A short paragraph introducing the business.".to_owned(),
                background_images: Vec::new(),
            },
            projects: Vec::new(),
            quality: Quality {
                title: "Quality Craftsmanship".to_owned(),
                description: "Why customers should trust your work.".to_owned(),
                image: String::new(),
            },
            about: About {
                description: "The story behind the business.".to_owned(),
            },
            contact: Contact::default(),
        }
    }

    /// Check structural invariants.
    ///
    /// Run after deserializing a document from storage; a well-typed
    /// document can still carry duplicate project ids or a cover image
    /// that is not part of its gallery.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidDocument`] naming the first violation.
    pub fn validate(&self) -> Result<(), EditError> {
        let mut seen = HashSet::new();
        for project in &self.projects {
            if !seen.insert(project.id) {
                return Err(EditError::InvalidDocument(format!(
                    "duplicate project id {}",
                    project.id
                )));
            }
            // Keeps max+1 id assignment overflow-free
            if project.id == u32::MAX {
                return Err(EditError::InvalidDocument(format!(
                    "project id {} is out of range",
                    project.id
                )));
            }
            if !project.main_image.is_empty()
                && !project.images.contains(&project.main_image)
            {
                return Err(EditError::InvalidDocument(format!(
                    "project {} main image {:?} is not in its gallery",
                    project.id, project.main_image
                )));
            }
        }
        Ok(())
    }

    /// Find a project by id.
    #[must_use]
    pub fn project(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Next free project id: max(existing ids, 0) + 1.
    ///
    /// Saturates at `u32::MAX`; `validate` rejects documents already at
    /// the ceiling, so assignment cannot wrap to a duplicate id.
    pub(crate) fn next_project_id(&self) -> u32 {
        self.projects
            .iter()
            .map(|p| p.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }
}
