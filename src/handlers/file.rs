use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use serde_json::json;

use crate::errors::AppError;
use crate::handlers::current_caller;
use crate::state::AppState;

/// Largest upload accepted, raw or as a form part (2 MiB).
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

#[derive(Serialize)]
struct FileUploadResponse {
    key: String,
    uri: String,
}

pub async fn upload_file(
    req: HttpRequest,
    state: web::Data<AppState>,
    file: web::Bytes,
) -> Result<HttpResponse, AppError> {
    current_caller(&req, &state).await?;

    if file.is_empty() {
        return Err(AppError::BadRequest("File is empty".to_string()));
    }
    if file.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest("File size exceeds 2MiB limit".to_string()));
    }

    let file_type = infer::get(&file).ok_or_else(|| AppError::BadRequest("Invalid file type".to_string()))?;
    if !matches!(file_type.mime_type(), "image/jpeg" | "image/png") {
        return Err(AppError::BadRequest("Only JPEG and PNG files are allowed".to_string()));
    }

    let file_name = format!("upload.{}", file_type.extension());
    let key = state.files.upload(file.to_vec(), &file_name).await?;
    let uri = state.files.public_url(&key);

    Ok(HttpResponse::Ok().json(FileUploadResponse { key, uri }))
}

pub async fn download_file(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    current_caller(&req, &state).await?;

    let bytes = state.files.download(&path).await?;
    let content_type = infer::get(&bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream");
    Ok(HttpResponse::Ok().content_type(content_type).body(bytes))
}

pub async fn delete_file(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    current_caller(&req, &state).await?;

    let message = state.files.delete(&path).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}
