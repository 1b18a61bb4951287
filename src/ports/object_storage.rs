//! Object Storage Port - bucket/key blob storage.
//!
//! Uploaded document bodies live in the uploads bucket under
//! `{created_by}/{title}`; rendered proposals live in the proposals bucket.
//!
//! # Contract
//!
//! Implementations must:
//! - Reject keys with empty segments, `.` or `..` (see [`validate_key`])
//! - Write atomically (no partial object on failure)
//! - Return the SHA-256 checksum of what was written

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for blob storage.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `bucket/key`, replacing any existing object.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;

    /// Read an object.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the object doesn't exist.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Check if an object exists.
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError>;

    /// Public URL for an object. Does not check existence.
    fn public_url(&self, bucket: &str, key: &str) -> String;
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 of the content.
    pub checksum: String,
}

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Object not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("Invalid object key: {key}")]
    InvalidKey { key: String },

    #[error("Object too large: {size_bytes} bytes (max: {max_bytes})")]
    TooLarge { size_bytes: u64, max_bytes: u64 },
}

impl StorageError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into() }
    }

    pub fn too_large(size_bytes: u64, max_bytes: u64) -> Self {
        Self::TooLarge {
            size_bytes,
            max_bytes,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::not_found(err.to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path: err.to_string(),
            },
            _ => StorageError::io(err.to_string()),
        }
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        DomainError::new(ErrorCode::StorageError, err.to_string())
    }
}

/// Validates a bucket or key: non-empty `/`-separated segments, none of
/// which is `.` or `..`, and no backslashes.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let bad = key.is_empty()
        || key.contains('\\')
        || key.contains('\0')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if bad {
        Err(StorageError::invalid_key(key))
    } else {
        Ok(())
    }
}
