//! `vitrine serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use vitrine_config::{CliSettings, Config};
use vitrine_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover vitrine.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Content document path (overrides config).
    #[arg(long)]
    content_file: Option<PathBuf>,

    /// Upload directory (overrides config).
    #[arg(long)]
    uploads_dir: Option<PathBuf>,

    /// Frontend directory (overrides config).
    #[arg(long)]
    frontend_dir: Option<PathBuf>,

    /// Enable verbose output (show request logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            content_file: self.content_file,
            uploads_dir: self.uploads_dir,
            frontend_dir: self.frontend_dir,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        // Print startup info
        output.highlight("vitrine content server");
        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Content document: {}",
            config.content_resolved.file.display()
        ));
        output.info(&format!(
            "Uploads: {} (served at {})",
            config.uploads_resolved.dir.display(),
            config.uploads_resolved.public_prefix
        ));
        output.info(&format!(
            "Frontend: {}",
            config.frontend_resolved.dir.display()
        ));

        if config.admin.token.is_some() {
            output.info("Admin gate: token required on mutating routes");
        } else {
            output.info("Admin gate: disabled (no admin.token in config)");
        }

        // Build server config and run
        let server_config = server_config_from_config(&config, self.verbose);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
