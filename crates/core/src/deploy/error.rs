//! Error types for the deployment pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::cloud::ServiceError;

use super::planning::Stage;

/// Result type alias for the deploy module.
pub type Result<T> = std::result::Result<T, DeployError>;

/// Errors that abort a deployment run.
///
/// Each variant is a failure class with its own process exit status.
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Artifact '{}' could not be read: {source}", path.display())]
    ArtifactMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to resolve the execution role: {source}")]
    IdentityResolution {
        #[source]
        source: ServiceError,
    },

    #[error("Failed to {stage}: {source}")]
    FunctionProvisioning {
        stage: Stage,
        #[source]
        source: ServiceError,
    },

    #[error("Failed to {stage}: {source}")]
    TriggerWiring {
        stage: Stage,
        #[source]
        source: ServiceError,
    },

    #[error("Operation cancelled by user")]
    Cancelled,
}

impl DeployError {
    /// Process exit status for this failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::Cancelled => 1,
            DeployError::ArtifactMissing { .. } => 3,
            DeployError::IdentityResolution { .. } => 4,
            DeployError::FunctionProvisioning { .. } => 5,
            DeployError::TriggerWiring { .. } => 6,
        }
    }

    /// The stage that failed, if the failure happened inside one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            DeployError::ArtifactMissing { .. } => Some(Stage::LoadArtifact),
            DeployError::IdentityResolution { .. } => Some(Stage::ResolveRole),
            DeployError::FunctionProvisioning { stage, .. }
            | DeployError::TriggerWiring { stage, .. } => Some(*stage),
            DeployError::Cancelled => None,
        }
    }
}
