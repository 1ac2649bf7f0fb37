//! `vitrine init` command implementation.

use std::path::PathBuf;

use clap::Args;
use vitrine_config::Config;
use vitrine_content::SiteContent;
use vitrine_store::{ContentStore, FsContentStore};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the init command.
#[derive(Args)]
pub(crate) struct InitArgs {
    /// Path to configuration file (default: auto-discover vitrine.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content document path (overrides config).
    #[arg(long)]
    content_file: Option<PathBuf>,

    /// Fill the document with sample placeholder content.
    #[arg(long)]
    sample: bool,

    /// Overwrite an existing content document.
    #[arg(short, long)]
    force: bool,
}

impl InitArgs {
    /// Execute the init command.
    ///
    /// # Errors
    ///
    /// Returns an error if the target exists without `--force` or the
    /// write fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let path = self
            .content_file
            .unwrap_or_else(|| config.content_resolved.file.clone());

        if path.exists() && !self.force {
            return Err(CliError::Validation(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        let content = if self.sample {
            SiteContent::seed()
        } else {
            SiteContent::default()
        };

        let store = FsContentStore::new(path.clone());
        store.save(&content)?;

        output.success(&format!("Created content document {}", path.display()));
        Ok(())
    }
}
