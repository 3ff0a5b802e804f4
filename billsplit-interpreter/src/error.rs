use billsplit_application::WorkspaceError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Usage: billsplit-interpreter <ledger.json>")]
    Usage,
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}
