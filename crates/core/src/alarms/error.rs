use thiserror::Error;

use crate::cloud::ServiceError;
use crate::resolver::ResolveError;

/// Errors that can occur while synchronizing one table's alarms.
///
/// All of them are scoped to a single table; the batch carries on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlarmError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("Failed to look up alarms for table '{table}': {source}")]
    Lookup {
        table: String,
        #[source]
        source: ServiceError,
    },
    #[error("Expected 2 alarms for table '{table}', found {found}")]
    CountMismatch { table: String, found: usize },
    #[error("Could not tell the read and write alarms of table '{table}' apart: {names:?}")]
    UnrecognizedPair { table: String, names: Vec<String> },
    #[error("Failed to put alarm '{alarm}': {source}")]
    Put {
        alarm: String,
        #[source]
        source: ServiceError,
    },
}

/// Result type for alarm operations.
pub type Result<T> = std::result::Result<T, AlarmError>;
