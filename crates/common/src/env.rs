//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected files and directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the parent directory of a data file exists so it can be created or appended to.
pub async fn ensure_parent_dir(path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if tokio::fs::metadata(parent).await.is_err() {
        info!(dir = %parent.display(), "creating data directory");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    Ok(())
}

/// Fail early when a required input file is missing.
pub async fn require_file(path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("{} is not a regular file", path.display())),
        Err(e) => {
            warn!(file = %path.display(), error = %e, "required file not found");
            Err(anyhow::anyhow!("required file {} not found: {e}", path.display()))
        }
    }
}
