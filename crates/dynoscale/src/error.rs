//! Top-level error type and exit status mapping.

use thiserror::Error;

use dynoscale_core::cloud::ServiceError;
use dynoscale_core::config::ConfigError;
use dynoscale_core::deploy::DeployError;

/// Result type alias for command runners.
pub type Result<T> = std::result::Result<T, CliError>;

/// Everything a command can fail with.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load the configuration store: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error("{failed} of {total} tables failed to synchronize")]
    AlarmTables { failed: usize, total: usize },

    #[error("Failed to list tables: {0}")]
    Catalog(#[from] ServiceError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit status. Usage errors (2) never get here; clap exits
    /// with them before a command runs.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Deploy(err) => err.exit_code(),
            _ => 1,
        }
    }
}
