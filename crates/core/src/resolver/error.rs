use thiserror::Error;

/// Errors that can occur when resolving a table's configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Missing configuration for table '{table}'")]
    ConfigurationNotFound { table: String },
}

/// Result type for resolver operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_not_found_display() {
        let error = ResolveError::ConfigurationNotFound {
            table: "Unknown".to_string(),
        };
        assert_eq!(error.to_string(), "Missing configuration for table 'Unknown'");
    }
}
