use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Create a directory and any missing parents; already existing is fine
pub async fn create_directory(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create directory {}", path.display()))
}

/// Remove a directory tree; an absent target is a no-op
pub async fn remove_directory(path: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to remove directory {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_directory_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("a/b/c");
        create_directory(&target).await.unwrap();
        create_directory(&target).await.unwrap();
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn remove_directory_tolerates_absent_target() {
        let tmp = tempfile::tempdir().unwrap();
        remove_directory(&tmp.path().join("nope")).await.unwrap();
    }

    #[tokio::test]
    async fn remove_directory_deletes_non_empty_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("bundle");
        tokio::fs::create_dir_all(target.join("nested")).await.unwrap();
        tokio::fs::write(target.join("nested/file.txt"), b"data")
            .await
            .unwrap();

        remove_directory(&target).await.unwrap();
        assert!(!target.exists());
    }
}
