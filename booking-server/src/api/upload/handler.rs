//! Venue Image Upload Handler
//!
//! Stores admin-uploaded venue photos under `work_dir/uploads` with a
//! random filename, keeping the original extension. The returned
//! relative path goes into `venue.image`.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use tokio::fs;
use uuid::Uuid;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image extensions
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub size: usize,
    /// Relative path to store in `venue.image`
    pub path: String,
}

fn validate_extension(filename: &str) -> AppResult<String> {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| AppError::validation("Filename has no extension"))?;

    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    // Extension says image; verify the declared mime agrees
    let mime = mime_guess::from_ext(&ext).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(AppError::validation(format!("Not an image format: {ext}")));
    }

    Ok(ext)
}

/// POST /api/upload/venue-image - 上传场地图片 (管理员)
pub async fn upload_venue_image(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let field = multipart
        .next_field()
        .await?
        .ok_or_else(|| AppError::validation("No file field in upload"))?;

    let original_name = field
        .file_name()
        .map(|n| n.to_string())
        .ok_or_else(|| AppError::validation("Upload field has no filename"))?;
    let ext = validate_extension(&original_name)?;

    let data = field.bytes().await?;
    if data.is_empty() {
        return Err(AppError::validation("Uploaded file is empty"));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let filename = format!("{}.{}", Uuid::new_v4().simple(), ext);
    let uploads_dir = state.config.uploads_dir();
    fs::create_dir_all(&uploads_dir)
        .await
        .map_err(|e| AppError::internal(format!("Failed to create uploads dir: {e}")))?;

    let target = uploads_dir.join(&filename);
    fs::write(&target, &data)
        .await
        .map_err(|e| AppError::internal(format!("Failed to write upload: {e}")))?;

    tracing::info!(filename = %filename, size = data.len(), "Venue image uploaded");
    Ok(Json(UploadResponse {
        path: format!("uploads/{filename}"),
        size: data.len(),
        filename,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_whitelist() {
        assert_eq!(validate_extension("hall.JPG").unwrap(), "jpg");
        assert_eq!(validate_extension("a.b.webp").unwrap(), "webp");
        assert!(validate_extension("venue.pdf").is_err());
        assert!(validate_extension("noext").is_err());
        assert!(validate_extension("script.sh").is_err());
    }
}
