//! Pure edit operations over [`SiteContent`].
//!
//! Each operation clones the tree, applies one scoped change and returns
//! the result. Entities the operation does not target compare equal to
//! their previous values, which lets the presentation layer detect
//! changes structurally.
//!
//! Operations that reference a project id or an image index fail with a
//! typed [`EditError`] when the target does not exist, rather than
//! silently returning the tree unchanged.

use crate::error::EditError;
use crate::model::{Project, SiteContent};

/// Scalar fields of the hero section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroField {
    Title,
    Subtitle,
    Description,
}

/// Editable scalar fields of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Title,
    Description,
}

/// Scalar fields of the contact section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Phone,
    Email,
    Instagram,
    Facebook,
}

impl SiteContent {
    /// Replace one scalar field under `hero`.
    #[must_use]
    pub fn set_hero_field(&self, field: HeroField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            HeroField::Title => &mut next.hero.title,
            HeroField::Subtitle => &mut next.hero.subtitle,
            HeroField::Description => &mut next.hero.description,
        };
        *slot = value.into();
        next
    }

    /// Append a path to `hero.background_images`.
    #[must_use]
    pub fn add_background_image(&self, path: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.hero.background_images.push(path.into());
        next
    }

    /// Remove the background image at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::BackgroundIndexOutOfRange`] if `index` is past
    /// the end of the list.
    pub fn remove_background_image(&self, index: usize) -> Result<Self, EditError> {
        if index >= self.hero.background_images.len() {
            return Err(EditError::BackgroundIndexOutOfRange(index));
        }
        let mut next = self.clone();
        next.hero.background_images.remove(index);
        Ok(next)
    }

    /// Append a new project with a fresh id and default text.
    ///
    /// The new id is `max(existing ids, 0) + 1`; the project starts with
    /// an empty gallery and no cover image.
    #[must_use]
    pub fn add_project(&self) -> Self {
        let mut next = self.clone();
        next.projects.push(Project {
            id: self.next_project_id(),
            title: "New Project".to_owned(),
            description: "Project description".to_owned(),
            images: Vec::new(),
            main_image: String::new(),
        });
        next
    }

    /// Remove the project with the given id. Other projects are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::ProjectNotFound`] if no project has that id.
    pub fn remove_project(&self, project_id: u32) -> Result<Self, EditError> {
        let mut next = self.clone();
        let before = next.projects.len();
        next.projects.retain(|p| p.id != project_id);
        if next.projects.len() == before {
            return Err(EditError::ProjectNotFound(project_id));
        }
        Ok(next)
    }

    /// Replace `title` or `description` on the matching project.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::ProjectNotFound`] if no project has that id.
    pub fn set_project_field(
        &self,
        project_id: u32,
        field: ProjectField,
        value: impl Into<String>,
    ) -> Result<Self, EditError> {
        let mut next = self.clone();
        let project = next.project_mut(project_id)?;
        let slot = match field {
            ProjectField::Title => &mut project.title,
            ProjectField::Description => &mut project.description,
        };
        *slot = value.into();
        Ok(next)
    }

    /// Append a path to the matching project's gallery.
    ///
    /// If the project had no cover image yet, the new path becomes it:
    /// the first image uploaded is the cover by default.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::ProjectNotFound`] if no project has that id.
    pub fn add_project_image(
        &self,
        project_id: u32,
        path: impl Into<String>,
    ) -> Result<Self, EditError> {
        let path = path.into();
        let mut next = self.clone();
        let project = next.project_mut(project_id)?;
        if project.main_image.is_empty() {
            project.main_image.clone_from(&path);
        }
        project.images.push(path);
        Ok(next)
    }

    /// Remove the gallery image at `index` from the matching project.
    ///
    /// If the removed image was the cover, the cover falls back to the
    /// new first image, or to empty when the gallery is now empty.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::ProjectNotFound`] for an unknown id and
    /// [`EditError::ImageIndexOutOfRange`] for an index past the gallery.
    pub fn remove_project_image(
        &self,
        project_id: u32,
        index: usize,
    ) -> Result<Self, EditError> {
        let mut next = self.clone();
        let project = next.project_mut(project_id)?;
        if index >= project.images.len() {
            return Err(EditError::ImageIndexOutOfRange {
                project: project_id,
                index,
            });
        }
        let removed = project.images.remove(index);
        if project.main_image == removed {
            project.main_image = project.images.first().cloned().unwrap_or_default();
        }
        Ok(next)
    }

    /// Set the matching project's cover image.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::ProjectNotFound`] for an unknown id and
    /// [`EditError::UnknownImage`] when `path` is not in the gallery,
    /// keeping the cover-in-gallery invariant intact.
    pub fn set_main_image(
        &self,
        project_id: u32,
        path: impl Into<String>,
    ) -> Result<Self, EditError> {
        let path = path.into();
        let mut next = self.clone();
        let project = next.project_mut(project_id)?;
        if !project.images.contains(&path) {
            return Err(EditError::UnknownImage {
                project: project_id,
                path,
            });
        }
        project.main_image = path;
        Ok(next)
    }

    /// Replace one scalar field under `contact`.
    #[must_use]
    pub fn set_contact_field(&self, field: ContactField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            ContactField::Phone => &mut next.contact.phone,
            ContactField::Email => &mut next.contact.email,
            ContactField::Instagram => &mut next.contact.instagram,
            ContactField::Facebook => &mut next.contact.facebook,
        };
        *slot = value.into();
        next
    }

    fn project_mut(&mut self, id: u32) -> Result<&mut Project, EditError> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(EditError::ProjectNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// A tree with one project carrying two gallery images.
    fn gallery_tree() -> SiteContent {
        SiteContent {
            projects: vec![Project {
                id: 1,
                title: "Kitchen".to_owned(),
                description: "Full refit".to_owned(),
                images: vec!["a".to_owned(), "b".to_owned()],
                main_image: "a".to_owned(),
            }],
            ..SiteContent::seed()
        }
    }

    #[test]
    fn test_set_hero_field_changes_only_that_field() {
        let content = SiteContent::seed();

        let updated = content.set_hero_field(HeroField::Subtitle, "New subtitle");

        assert_eq!(updated.hero.subtitle, "New subtitle");
        assert_eq!(updated.hero.title, content.hero.title);
        assert_eq!(updated.hero.description, content.hero.description);
        assert_eq!(updated.projects, content.projects);
        assert_eq!(updated.quality, content.quality);
        assert_eq!(updated.about, content.about);
        assert_eq!(updated.contact, content.contact);
    }

    #[test]
    fn test_set_hero_field_does_not_mutate_input() {
        let content = SiteContent::seed();
        let original = content.clone();

        let _updated = content.set_hero_field(HeroField::Title, "Changed");

        assert_eq!(content, original);
    }

    #[test]
    fn test_set_contact_field_changes_only_that_field() {
        let content = SiteContent::seed();

        let updated = content.set_contact_field(ContactField::Email, "hi@example.com");

        assert_eq!(updated.contact.email, "hi@example.com");
        assert_eq!(updated.contact.phone, content.contact.phone);
        assert_eq!(updated.hero, content.hero);
    }

    #[test]
    fn test_add_background_image_appends_in_order() {
        let content = SiteContent::seed()
            .add_background_image("/portfolio/one.jpg")
            .add_background_image("/portfolio/two.jpg");

        assert_eq!(
            content.hero.background_images,
            vec!["/portfolio/one.jpg", "/portfolio/two.jpg"]
        );
    }

    #[test]
    fn test_remove_background_image() {
        let content = SiteContent::seed()
            .add_background_image("/portfolio/one.jpg")
            .add_background_image("/portfolio/two.jpg");

        let updated = content.remove_background_image(0).unwrap();

        assert_eq!(updated.hero.background_images, vec!["/portfolio/two.jpg"]);
    }

    #[test]
    fn test_remove_background_image_out_of_range() {
        let content = SiteContent::seed();

        let err = content.remove_background_image(0).unwrap_err();

        assert_eq!(err, EditError::BackgroundIndexOutOfRange(0));
    }

    #[test]
    fn test_add_project_defaults() {
        let content = SiteContent::seed().add_project();

        let project = &content.projects[0];
        assert_eq!(project.id, 1);
        assert_eq!(project.title, "New Project");
        assert_eq!(project.description, "Project description");
        assert!(project.images.is_empty());
        assert_eq!(project.main_image, "");
    }

    #[test]
    fn test_add_project_twice_yields_increasing_ids() {
        let content = SiteContent::seed().add_project().add_project();

        let ids: Vec<u32> = content.projects.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_add_then_remove_project_round_trips() {
        let original = SiteContent::seed();

        let added = original.add_project();
        let new_id = added.projects.last().unwrap().id;
        let removed = added.remove_project(new_id).unwrap();

        assert_eq!(removed, original);
    }

    #[test]
    fn test_remove_project_leaves_others_untouched() {
        let content = SiteContent::seed().add_project().add_project();

        let updated = content.remove_project(1).unwrap();

        assert_eq!(updated.projects.len(), 1);
        assert_eq!(updated.projects[0], content.projects[1]);
    }

    #[test]
    fn test_remove_project_unknown_id() {
        let err = SiteContent::seed().remove_project(9).unwrap_err();

        assert_eq!(err, EditError::ProjectNotFound(9));
    }

    #[test]
    fn test_set_project_field_targets_one_project() {
        let content = SiteContent::seed().add_project().add_project();

        let updated = content
            .set_project_field(2, ProjectField::Title, "Bathroom")
            .unwrap();

        assert_eq!(updated.projects[1].title, "Bathroom");
        assert_eq!(updated.projects[0], content.projects[0]);
    }

    #[test]
    fn test_set_project_field_unknown_id() {
        let err = SiteContent::seed()
            .set_project_field(1, ProjectField::Title, "X")
            .unwrap_err();

        assert_eq!(err, EditError::ProjectNotFound(1));
    }

    #[test]
    fn test_first_image_becomes_main() {
        let content = SiteContent::seed().add_project();

        let updated = content.add_project_image(1, "/portfolio/a.jpg").unwrap();

        assert_eq!(updated.projects[0].images, vec!["/portfolio/a.jpg"]);
        assert_eq!(updated.projects[0].main_image, "/portfolio/a.jpg");
    }

    #[test]
    fn test_second_image_keeps_existing_main() {
        let content = SiteContent::seed().add_project();

        let updated = content
            .add_project_image(1, "/portfolio/a.jpg")
            .unwrap()
            .add_project_image(1, "/portfolio/b.jpg")
            .unwrap();

        assert_eq!(updated.projects[0].main_image, "/portfolio/a.jpg");
        assert_eq!(updated.projects[0].images.len(), 2);
    }

    #[test]
    fn test_remove_main_image_falls_back_to_new_first() {
        let content = gallery_tree();

        let updated = content.remove_project_image(1, 0).unwrap();

        let project = &updated.projects[0];
        assert_eq!(project.images, vec!["b"]);
        assert_eq!(project.main_image, "b");
    }

    #[test]
    fn test_remove_only_image_clears_main() {
        let content = SiteContent::seed().add_project();
        let content = content.add_project_image(1, "a").unwrap();

        let updated = content.remove_project_image(1, 0).unwrap();

        let project = &updated.projects[0];
        assert!(project.images.is_empty());
        assert_eq!(project.main_image, "");
    }

    #[test]
    fn test_remove_non_main_image_keeps_main() {
        let content = gallery_tree();

        let updated = content.remove_project_image(1, 1).unwrap();

        let project = &updated.projects[0];
        assert_eq!(project.images, vec!["a"]);
        assert_eq!(project.main_image, "a");
    }

    #[test]
    fn test_remove_project_image_out_of_range() {
        let err = gallery_tree().remove_project_image(1, 5).unwrap_err();

        assert_eq!(
            err,
            EditError::ImageIndexOutOfRange {
                project: 1,
                index: 5
            }
        );
    }

    #[test]
    fn test_set_main_image() {
        let updated = gallery_tree().set_main_image(1, "b").unwrap();

        assert_eq!(updated.projects[0].main_image, "b");
    }

    #[test]
    fn test_set_main_image_rejects_unknown_path() {
        let err = gallery_tree().set_main_image(1, "c").unwrap_err();

        assert_eq!(
            err,
            EditError::UnknownImage {
                project: 1,
                path: "c".to_owned()
            }
        );
    }

    #[test]
    fn test_edits_preserve_validity() {
        let content = gallery_tree()
            .add_project()
            .add_project_image(2, "x")
            .unwrap()
            .remove_project_image(1, 0)
            .unwrap()
            .set_main_image(2, "x")
            .unwrap();

        assert!(content.validate().is_ok());
    }
}
