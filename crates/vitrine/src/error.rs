//! CLI error types.

use vitrine_config::ConfigError;
use vitrine_content::EditError;
use vitrine_store::StoreError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Edit(#[from] EditError),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Validation(String),
}
