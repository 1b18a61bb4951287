//! In-memory object storage for tests and development.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{validate_key, ObjectStorage, StorageError, StoredObject};

/// Objects keyed by `(bucket, key)`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStorage {
    objects: Arc<RwLock<HashMap<(String, String), Vec<u8>>>>,
    /// Buckets whose reads fail with an IO error.
    broken_buckets: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `get` on `bucket` fail, to exercise read-failure paths.
    pub async fn break_bucket(&self, bucket: impl Into<String>) {
        self.broken_buckets.write().await.insert(bucket.into());
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        _content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        validate_key(bucket)?;
        validate_key(key)?;

        self.objects
            .write()
            .await
            .insert((bucket.to_string(), key.to_string()), bytes.to_vec());

        Ok(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            size_bytes: bytes.len() as u64,
            checksum: hex::encode(Sha256::digest(bytes)),
        })
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        validate_key(bucket)?;
        validate_key(key)?;

        if self.broken_buckets.read().await.contains(bucket) {
            return Err(StorageError::io(format!("bucket {} unavailable", bucket)));
        }

        self.objects
            .read()
            .await
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::not_found(format!("{}/{}", bucket, key)))
    }

    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError> {
        Ok(self
            .objects
            .read()
            .await
            .contains_key(&(bucket.to_string(), key.to_string())))
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("memory://{}/{}", bucket, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_reads_objects() {
        let storage = InMemoryObjectStorage::new();
        storage.put("uploads", "u/a.txt", b"hello", "text/plain").await.unwrap();

        assert_eq!(storage.get("uploads", "u/a.txt").await.unwrap(), b"hello");
        assert!(storage.exists("uploads", "u/a.txt").await.unwrap());
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn broken_bucket_fails_reads() {
        let storage = InMemoryObjectStorage::new();
        storage.put("uploads", "a.txt", b"hello", "text/plain").await.unwrap();
        storage.break_bucket("uploads").await;

        let err = storage.get("uploads", "a.txt").await.unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[tokio::test]
    async fn missing_object_is_not_found() {
        let storage = InMemoryObjectStorage::new();
        assert!(storage.get("b", "k").await.unwrap_err().is_not_found());
    }
}
