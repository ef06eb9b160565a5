use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use serde::de::DeserializeOwned;

use crate::errors::AppError;
use crate::storage::UploadedFile;

/// Reads a `multipart/form-data` body made of a JSON `data` part and an
/// optional `file` part. An empty file part counts as no file. Other parts are
/// drained without being kept, and a kept part longer than `max_bytes` is
/// rejected.
pub async fn read_form<T: DeserializeOwned>(
    mut payload: Multipart,
    max_bytes: usize,
) -> Result<(T, Option<UploadedFile>), AppError> {
    let mut data: Option<T> = None;
    let mut file: Option<UploadedFile> = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))?
    {
        let disposition = field.content_disposition().clone();
        let keep = matches!(disposition.get_name(), Some("data") | Some("file"));
        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|err| AppError::BadRequest(err.to_string()))?
        {
            if !keep {
                continue;
            }
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::BadRequest(format!(
                    "Form part exceeds {} byte limit",
                    max_bytes
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        match disposition.get_name() {
            Some("data") => {
                data = Some(
                    serde_json::from_slice(&bytes)
                        .map_err(|err| AppError::BadRequest(format!("Invalid data part: {}", err)))?,
                );
            }
            Some("file") => {
                let upload = UploadedFile {
                    file_name: disposition.get_filename().unwrap_or("file").to_string(),
                    bytes,
                };
                if !upload.is_empty() {
                    file = Some(upload);
                }
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::BadRequest("Missing data part".to_string()))?;
    Ok((data, file))
}
