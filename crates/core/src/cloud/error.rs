use thiserror::Error;

/// Outcome of a failed cloud service call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{resource} not found")]
    NotFound { resource: String },
    #[error("{resource} conflicts with an existing resource")]
    Conflict { resource: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
}

impl ServiceError {
    /// Whether the service rejected the call because the resource already exists.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ServiceError::Conflict { .. })
    }

    /// Whether the service reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }
}

/// Result type for cloud service calls.
pub type Result<T> = std::result::Result<T, ServiceError>;
