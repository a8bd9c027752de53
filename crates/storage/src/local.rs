//! Local filesystem storage backend.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{validate_key, StorageAdapter, StorageError};

/// Stores objects as plain files under a base directory. Keys map to
/// relative paths; parent directories are created on demand.
pub struct LocalStorage {
    base: PathBuf,
}

impl LocalStorage {
    /// Create the backend, making sure the base directory exists.
    pub async fn new(base_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let base = base_path.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&base).await?;
        Ok(Self { base })
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.base.join(key))
    }
}

#[async_trait]
impl StorageAdapter for LocalStorage {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(key, size = bytes.len(), "Stored object");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound { key: key.to_string() })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        let mut stack = vec![self.base.clone()];

        while let Some(dir) = stack.pop() {
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    stack.push(path);
                    continue;
                }
                let rel = path
                    .strip_prefix(&self.base)
                    .map_err(|e| StorageError::Backend(e.to_string()))?;
                let key = rel.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/");
                if key.starts_with(prefix) {
                    keys.push(key);
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    async fn storage() -> (tempfile::TempDir, LocalStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        (dir, storage)
    }

    #[tokio::test]
    async fn put_then_get_returns_bytes() {
        let (_dir, storage) = storage().await;
        storage.put("documents/a.pdf", b"hello").await.unwrap();
        assert_eq!(storage.get("documents/a.pdf").await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn get_missing_key_is_not_found() {
        let (_dir, storage) = storage().await;
        assert_matches!(
            storage.get("documents/missing.pdf").await,
            Err(StorageError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (_dir, storage) = storage().await;
        storage.put("x", b"1").await.unwrap();
        storage.delete("x").await.unwrap();
        storage.delete("x").await.unwrap();
        assert_matches!(storage.get("x").await, Err(StorageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_filters_by_prefix() {
        let (_dir, storage) = storage().await;
        storage.put("documents/a", b"1").await.unwrap();
        storage.put("documents/b", b"2").await.unwrap();
        storage.put("other/c", b"3").await.unwrap();

        let keys = storage.list("documents/").await.unwrap();
        assert_eq!(keys, vec!["documents/a", "documents/b"]);
    }

    #[tokio::test]
    async fn traversal_key_rejected() {
        let (_dir, storage) = storage().await;
        assert_matches!(
            storage.put("../escape", b"x").await,
            Err(StorageError::InvalidKey { .. })
        );
    }
}
