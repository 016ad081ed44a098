//! Path and directory management.

use std::path::Path;

use crate::error::Result;

/// Ensure the parent directory of `path` exists, creating it if necessary.
pub async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}
