use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading the configuration store.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration store at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration store: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Group {group}: {dimension}.Max must be a positive integer")]
    NonPositiveMax {
        group: String,
        dimension: &'static str,
    },
    #[error("Group {group}: {dimension}.Min ({min}) is greater than Max ({max})")]
    MinAboveMax {
        group: String,
        dimension: &'static str,
        min: u64,
        max: u64,
    },
}

/// Result type for configuration store operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
