//! `vitrine edit` command implementation.
//!
//! Headless counterparts of the admin panel operations. Each invocation
//! is one editing session: load the document, apply the edit to a fresh
//! tree, save the result.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand, ValueEnum};
use vitrine_config::Config;
use vitrine_content::{ContactField, HeroField, ProjectField};
use vitrine_store::{ContentStore, EditorSession, FsContentStore};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the edit command.
#[derive(Args)]
pub(crate) struct EditArgs {
    /// Path to configuration file (default: auto-discover vitrine.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content document path (overrides config).
    #[arg(long)]
    content_file: Option<PathBuf>,

    #[command(subcommand)]
    target: EditTarget,
}

/// Section of the document to edit.
#[derive(Subcommand)]
enum EditTarget {
    /// Edit the hero section.
    #[command(subcommand)]
    Hero(HeroCommand),
    /// Edit the project portfolio.
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Edit the contact section.
    #[command(subcommand)]
    Contact(ContactCommand),
}

#[derive(Subcommand)]
enum HeroCommand {
    /// Set a hero text field.
    Set {
        field: HeroFieldArg,
        value: String,
    },
    /// Append a background image path.
    AddBackground { path: String },
    /// Remove a background image by index.
    RemoveBackground { index: usize },
}

#[derive(Subcommand)]
enum ProjectCommand {
    /// Add a new project with a generated id.
    Add,
    /// Remove a project by id.
    Remove { id: u32 },
    /// Set a project text field.
    Set {
        id: u32,
        field: ProjectFieldArg,
        value: String,
    },
    /// Append an image to a project gallery.
    AddImage { id: u32, path: String },
    /// Remove a project image by index.
    RemoveImage { id: u32, index: usize },
    /// Choose the main image of a project.
    SetMainImage { id: u32, path: String },
}

#[derive(Subcommand)]
enum ContactCommand {
    /// Set a contact field.
    Set {
        field: ContactFieldArg,
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum HeroFieldArg {
    Title,
    Subtitle,
    Description,
}

impl From<HeroFieldArg> for HeroField {
    fn from(arg: HeroFieldArg) -> Self {
        match arg {
            HeroFieldArg::Title => Self::Title,
            HeroFieldArg::Subtitle => Self::Subtitle,
            HeroFieldArg::Description => Self::Description,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ProjectFieldArg {
    Title,
    Description,
}

impl From<ProjectFieldArg> for ProjectField {
    fn from(arg: ProjectFieldArg) -> Self {
        match arg {
            ProjectFieldArg::Title => Self::Title,
            ProjectFieldArg::Description => Self::Description,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ContactFieldArg {
    Phone,
    Email,
    Instagram,
    Facebook,
}

impl From<ContactFieldArg> for ContactField {
    fn from(arg: ContactFieldArg) -> Self {
        match arg {
            ContactFieldArg::Phone => Self::Phone,
            ContactFieldArg::Email => Self::Email,
            ContactFieldArg::Instagram => Self::Instagram,
            ContactFieldArg::Facebook => Self::Facebook,
        }
    }
}

impl EditArgs {
    /// Execute the edit command.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be loaded, the edit
    /// targets a missing project/index, or the save fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let path = self
            .content_file
            .unwrap_or_else(|| config.content_resolved.file.clone());

        let store: Arc<dyn ContentStore> = Arc::new(FsContentStore::new(path));
        let mut session = EditorSession::load(store)?;

        let summary = apply_edit(&mut session, self.target)?;
        session.save()?;

        output.success(&summary);
        Ok(())
    }
}

/// Apply one edit to the session and describe it.
fn apply_edit(session: &mut EditorSession, target: EditTarget) -> Result<String, CliError> {
    let summary = match target {
        EditTarget::Hero(cmd) => match cmd {
            HeroCommand::Set { field, value } => {
                let field = HeroField::from(field);
                session.apply(|c| Ok(c.set_hero_field(field, value)))?;
                "Updated hero".to_owned()
            }
            HeroCommand::AddBackground { path } => {
                session.apply(|c| Ok(c.add_background_image(path)))?;
                "Added background image".to_owned()
            }
            HeroCommand::RemoveBackground { index } => {
                session.apply(|c| c.remove_background_image(index))?;
                format!("Removed background image {index}")
            }
        },
        EditTarget::Project(cmd) => match cmd {
            ProjectCommand::Add => {
                session.apply(|c| Ok(c.add_project()))?;
                let id = session
                    .content()
                    .projects
                    .last()
                    .map_or(0, |project| project.id);
                format!("Added project {id}")
            }
            ProjectCommand::Remove { id } => {
                session.apply(|c| c.remove_project(id))?;
                format!("Removed project {id}")
            }
            ProjectCommand::Set { id, field, value } => {
                let field = ProjectField::from(field);
                session.apply(|c| c.set_project_field(id, field, value))?;
                format!("Updated project {id}")
            }
            ProjectCommand::AddImage { id, path } => {
                session.apply(|c| c.add_project_image(id, path))?;
                format!("Added image to project {id}")
            }
            ProjectCommand::RemoveImage { id, index } => {
                session.apply(|c| c.remove_project_image(id, index))?;
                format!("Removed image {index} from project {id}")
            }
            ProjectCommand::SetMainImage { id, path } => {
                session.apply(|c| c.set_main_image(id, &path))?;
                format!("Set main image of project {id}")
            }
        },
        EditTarget::Contact(cmd) => match cmd {
            ContactCommand::Set { field, value } => {
                let field = ContactField::from(field);
                session.apply(|c| Ok(c.set_contact_field(field, value)))?;
                "Updated contact".to_owned()
            }
        },
    };

    Ok(summary)
}
