use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::{bucket_url, object_key, FileStorage};
use crate::errors::StorageError;

pub struct InMemoryFileStorage {
    bucket: String,
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryFileStorage {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.objects.lock().await.contains_key(key)
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn upload(&self, bytes: Vec<u8>, original_name: &str) -> Result<String, StorageError> {
        let key = object_key(original_name);
        self.objects.lock().await.insert(key.clone(), bytes);
        Ok(key)
    }

    async fn download(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.objects
            .lock()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<String, StorageError> {
        self.objects.lock().await.remove(key);
        Ok(format!("{} removed ...", key))
    }

    fn public_url(&self, key: &str) -> String {
        bucket_url(&self.bucket, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_download_delete() {
        let storage = InMemoryFileStorage::new("store-media");
        let key = storage.upload(b"png".to_vec(), "a.png").await.unwrap();

        assert_eq!(storage.download(&key).await.unwrap(), b"png");
        assert_eq!(storage.delete(&key).await.unwrap(), format!("{} removed ...", key));
        assert!(matches!(storage.download(&key).await, Err(StorageError::NotFound(_))));
    }
}
