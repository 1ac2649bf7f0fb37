//! CLI command implementations.

pub(crate) mod edit;
pub(crate) mod init;
pub(crate) mod serve;

pub(crate) use edit::EditArgs;
pub(crate) use init::InitArgs;
pub(crate) use serve::ServeArgs;
