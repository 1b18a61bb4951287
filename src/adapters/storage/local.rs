//! Local Filesystem Object Storage - Implementation of ObjectStorage.
//!
//! Uses atomic writes and SHA-256 checksums for data integrity.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::ports::{validate_key, ObjectStorage, StorageError, StoredObject};

/// Maximum object size allowed (10 MB).
pub const MAX_OBJECT_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Local filesystem storage.
///
/// # Directory Structure
///
/// ```text
/// {root}/
/// ├── uploads/
/// │   └── user-123/
/// │       └── requirements.txt
/// └── proposals/
///     └── proposal_{project}_{millis}.md
/// ```
///
/// # Atomic Writes
///
/// 1. Write content to `{key}.{uuid}.tmp`
/// 2. Sync to disk
/// 3. Rename to `{key}`
#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(bucket)?;
        validate_key(key)?;
        Ok(self.root.join(bucket).join(key))
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
        path.with_file_name(name)
    }

    fn compute_checksum(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        hex::encode(hasher.finalize())
    }

    fn map_io(path: &Path, err: std::io::Error) -> StorageError {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::not_found(path.display().to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => StorageError::io(format!("{}: {}", path.display(), err)),
        }
    }

    async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::map_io(parent, e))?;
        }

        let temp_path = Self::temp_path(path);
        let result = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(bytes).await?;
            file.sync_all().await?;
            fs::rename(&temp_path, path).await
        }
        .await;

        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path).await;
            return Err(Self::map_io(path, e));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let size = bytes.len() as u64;
        if size > MAX_OBJECT_SIZE_BYTES {
            return Err(StorageError::too_large(size, MAX_OBJECT_SIZE_BYTES));
        }

        let path = self.object_path(bucket, key)?;
        Self::write_atomic(&path, bytes).await?;

        tracing::debug!(bucket, key, size, content_type, "stored object");

        Ok(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            size_bytes: size,
            checksum: Self::compute_checksum(bytes),
        })
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.object_path(bucket, key)?;
        fs::read(&path).await.map_err(|e| Self::map_io(&path, e))
    }

    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError> {
        let path = self.object_path(bucket, key)?;
        fs::try_exists(&path)
            .await
            .map_err(|e| Self::map_io(&path, e))
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, bucket, key)
    }
}
