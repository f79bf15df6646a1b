//! CLI error types.

use azdo_config::ConfigError;
use azdo_client::{WikiError, WorkItemError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Wiki(#[from] WikiError),

    #[error("{0}")]
    WorkItem(#[from] WorkItemError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}

impl CliError {
    /// Whether the failure came from rejected credentials.
    pub(crate) fn is_unauthorized(&self) -> bool {
        match self {
            Self::Wiki(err) => err.is_unauthorized(),
            Self::WorkItem(err) => err.is_unauthorized(),
            _ => false,
        }
    }
}
