use std::path::Path;

use super::error::{DeployError, Result};

/// Reads the zipped function code. Touches the local disk only.
pub async fn load_artifact(path: &Path) -> Result<Vec<u8>> {
    let code = tokio::fs::read(path)
        .await
        .map_err(|source| DeployError::ArtifactMissing {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), bytes = code.len(), "Loaded artifact");
    Ok(code)
}

/// Fails with `ArtifactMissing` when nothing can be read at `path`.
pub async fn check_artifact(path: &Path) -> Result<()> {
    tokio::fs::metadata(path)
        .await
        .map(|_| ())
        .map_err(|source| DeployError::ArtifactMissing {
            path: path.to_path_buf(),
            source,
        })
}
