//! File storage gateway: avatars and customer images live in an object store,
//! keyed by `<unix-millis>_<original-file-name>`.

pub mod memory;
pub mod s3;

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::StorageError;

pub use memory::InMemoryFileStorage;
pub use s3::S3FileStorage;

/// A file received with a request, before it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores the bytes and returns the generated key.
    async fn upload(&self, bytes: Vec<u8>, original_name: &str) -> Result<String, StorageError>;
    async fn download(&self, key: &str) -> Result<Vec<u8>, StorageError>;
    async fn delete(&self, key: &str) -> Result<String, StorageError>;
    fn public_url(&self, key: &str) -> String;
}

pub fn object_key(original_name: &str) -> String {
    // keep only the last path segment of client supplied names
    let name = original_name
        .rsplit(['/', '\\'])
        .next()
        .filter(|n| !n.is_empty())
        .unwrap_or("file");
    format!("{}_{}", Utc::now().timestamp_millis(), name)
}

pub fn bucket_url(bucket: &str, key: &str) -> String {
    format!("https://{}.s3.amazonaws.com/{}", bucket, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_timestamp_then_name() {
        let key = object_key("avatar.png");
        let (millis, name) = key.split_once('_').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(name, "avatar.png");
    }

    #[test]
    fn key_drops_directories() {
        assert!(object_key("../../etc/passwd").ends_with("_passwd"));
        assert!(object_key("C:\\photos\\me.jpg").ends_with("_me.jpg"));
        assert!(object_key("").ends_with("_file"));
    }

    #[test]
    fn url_is_derived_from_bucket() {
        assert_eq!(
            bucket_url("store-media", "1_a.png"),
            "https://store-media.s3.amazonaws.com/1_a.png"
        );
    }
}
