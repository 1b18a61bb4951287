//! Object storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Local object storage settings
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory that holds one subdirectory per bucket
    #[serde(default = "default_root_path")]
    pub root_path: PathBuf,

    /// Base of the public URLs handed out for stored objects
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    #[serde(default = "default_uploads_bucket")]
    pub uploads_bucket: String,

    #[serde(default = "default_proposals_bucket")]
    pub proposals_bucket: String,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for bucket in [&self.uploads_bucket, &self.proposals_bucket] {
            if bucket.is_empty() || bucket.contains('/') || bucket.contains('\\') || bucket.starts_with('.') {
                return Err(ValidationError::InvalidBucket(bucket.clone()));
            }
        }
        if self.public_base_url.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE_PUBLIC_BASE_URL"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            public_base_url: default_public_base_url(),
            uploads_bucket: default_uploads_bucket(),
            proposals_bucket: default_proposals_bucket(),
        }
    }
}

fn default_root_path() -> PathBuf {
    PathBuf::from("./data/objects")
}

fn default_public_base_url() -> String {
    "http://localhost:8080/files".to_string()
}

fn default_uploads_bucket() -> String {
    "uploads".to_string()
}

fn default_proposals_bucket() -> String {
    "proposals".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults_are_valid() {
        let config = StorageConfig::default();
        assert_eq!(config.uploads_bucket, "uploads");
        assert_eq!(config.proposals_bucket, "proposals");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_bucket_is_rejected() {
        let config = StorageConfig {
            proposals_bucket: "a/b".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidBucket("a/b".to_string()))
        );
    }
}
