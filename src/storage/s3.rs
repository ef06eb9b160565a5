use async_trait::async_trait;
use aws_config::{BehaviorVersion, ConfigLoader};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use aws_types::region::Region;
use std::path::PathBuf;

use super::{bucket_url, object_key, FileStorage};
use crate::errors::StorageError;

pub async fn create_s3_client(region: Option<String>) -> S3Client {
    let aws_config = ConfigLoader::default()
        .region(region.map(Region::new))
        .behavior_version(BehaviorVersion::latest())
        .load()
        .await;

    S3Client::new(&aws_config)
}

pub struct S3FileStorage {
    client: S3Client,
    bucket: String,
    tmp_dir: PathBuf,
}

impl S3FileStorage {
    pub fn new(client: S3Client, bucket: String, tmp_dir: PathBuf) -> Self {
        Self {
            client,
            bucket,
            tmp_dir,
        }
    }
}

#[async_trait]
impl FileStorage for S3FileStorage {
    async fn upload(&self, bytes: Vec<u8>, original_name: &str) -> Result<String, StorageError> {
        let key = object_key(original_name);
        let staged = self.tmp_dir.join(&key);
        tokio::fs::write(&staged, &bytes).await?;

        let result = match ByteStream::from_path(&staged).await {
            Ok(body) => self
                .client
                .put_object()
                .bucket(&self.bucket)
                .key(&key)
                .body(body)
                .send()
                .await
                .map(|_| ())
                .map_err(|err| StorageError::Upstream(DisplayErrorContext(&err).to_string())),
            Err(err) => Err(StorageError::Upstream(err.to_string())),
        };

        if let Err(err) = tokio::fs::remove_file(&staged).await {
            log::warn!("Failed to remove staged upload {}: {}", staged.display(), err);
        }

        result?;
        log::info!("Uploaded {} to bucket {}", key, self.bucket);
        Ok(key)
    }

    async fn download(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err.as_service_error().map(|e| e.is_no_such_key()).unwrap_or(false) {
                    StorageError::NotFound(key.to_string())
                } else {
                    StorageError::Upstream(DisplayErrorContext(&err).to_string())
                }
            })?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|err| StorageError::Upstream(err.to_string()))?;
        Ok(data.into_bytes().to_vec())
    }

    async fn delete(&self, key: &str) -> Result<String, StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| StorageError::Upstream(DisplayErrorContext(&err).to_string()))?;
        Ok(format!("{} removed ...", key))
    }

    fn public_url(&self, key: &str) -> String {
        bucket_url(&self.bucket, key)
    }
}
