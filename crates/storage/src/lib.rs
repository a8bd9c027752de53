//! Document storage adapter.
//!
//! A uniform put/get/delete/list interface over either the local
//! filesystem or an S3-compatible object store, selected by configuration.
//! The rest of the system only ever sees [`StorageAdapter`] behind an
//! `Arc<dyn ...>`.

use std::sync::Arc;

use async_trait::async_trait;

pub mod local;
pub mod s3;

pub use local::LocalStorage;
pub use s3::S3Storage;

/// Errors surfaced by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Object not found: {key}")]
    NotFound { key: String },

    #[error("Invalid storage key: {key}")]
    InvalidKey { key: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid storage configuration: {0}")]
    Config(String),
}

/// Uniform interface over a document storage backend.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Store `bytes` under `key`, overwriting any existing object.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Retrieve the object stored under `key`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Delete the object stored under `key`. Deleting a missing key is not
    /// an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// List keys starting with `prefix`.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

/// Storage backend selection, loaded from the environment.
///
/// - `local`: requires `STORAGE_BASE_PATH`
/// - `s3`: requires `STORAGE_BUCKET` and `STORAGE_REGION`
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Local { base_path: String },
    S3 { bucket: String, region: String },
}

impl StorageConfig {
    /// Read `STORAGE_BACKEND` (default `local`) and the backend-specific
    /// variables.
    pub fn from_env() -> Result<Self, StorageError> {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into());
        match backend.as_str() {
            "local" => {
                let base_path = std::env::var("STORAGE_BASE_PATH")
                    .unwrap_or_else(|_| "./data/documents".into());
                Ok(Self::Local { base_path })
            }
            "s3" => {
                let bucket = std::env::var("STORAGE_BUCKET").map_err(|_| {
                    StorageError::Config("s3 backend requires STORAGE_BUCKET".into())
                })?;
                let region = std::env::var("STORAGE_REGION").map_err(|_| {
                    StorageError::Config("s3 backend requires STORAGE_REGION".into())
                })?;
                Ok(Self::S3 { bucket, region })
            }
            other => Err(StorageError::Config(format!(
                "Unknown storage backend '{other}'. Must be one of: local, s3"
            ))),
        }
    }
}

/// Construct the configured backend.
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn StorageAdapter>, StorageError> {
    match config {
        StorageConfig::Local { base_path } => {
            let storage = LocalStorage::new(base_path).await?;
            tracing::info!(base_path, "Using local filesystem storage");
            Ok(Arc::new(storage))
        }
        StorageConfig::S3 { bucket, region } => {
            let storage = S3Storage::connect(bucket, region).await;
            tracing::info!(bucket, region, "Using S3 storage");
            Ok(Arc::new(storage))
        }
    }
}

/// Reject keys that could escape the storage root or collide with hidden
/// files. Valid keys are relative, slash-separated, and contain no `..`
/// segments.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == ".." );
    if invalid {
        return Err(StorageError::InvalidKey { key: key.to_string() });
    }
    Ok(())
}
