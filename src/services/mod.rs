pub mod activity_log_service;
pub mod auth_service;
pub mod customer_group_service;
pub mod customer_service;
pub mod shift_service;
pub mod staff_salary_service;
pub mod staff_service;

#[cfg(test)]
pub(crate) mod test_support;

use crate::errors::AppError;
use crate::models::media::Media;
use crate::repositories::MediaRepository;
use crate::storage::{FileStorage, UploadedFile};

/// Stores an uploaded file and records it as a media row.
pub(crate) async fn upload_media(
    files: &dyn FileStorage,
    media: &dyn MediaRepository,
    file: UploadedFile,
) -> Result<Media, AppError> {
    let key = files.upload(file.bytes, &file.file_name).await?;
    let row = Media::new(files.public_url(&key));
    media.save(&row).await?;
    Ok(row)
}
