use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{ALLOWED_IMAGE_TYPES, MAX_UPLOAD_BYTES};

/// Upload image request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// JPEG, PNG or WebP image, at most 5 MiB
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Image read from the multipart body, not yet checked
#[derive(Debug)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

impl ImageUpload {
    /// Size and type checks done before anything is sent to the backend
    pub fn check(&self) -> Result<(), String> {
        if self.data.is_empty() {
            return Err("File kosong".to_string());
        }
        if self.data.len() > MAX_UPLOAD_BYTES {
            return Err(format!(
                "Ukuran file maksimal {} MB",
                MAX_UPLOAD_BYTES / 1024 / 1024
            ));
        }
        if !is_image_type_allowed(&self.content_type) {
            return Err("Format file harus JPG, PNG, atau WebP".to_string());
        }
        Ok(())
    }
}

pub fn is_image_type_allowed(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ALLOWED_IMAGE_TYPES.contains(&essence.as_str())
}

/// Backend answer to an upload
#[derive(Debug, Deserialize)]
pub struct BackendUploadResult {
    #[serde(alias = "fileUrl", alias = "path")]
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponseDto {
    /// Where the stored image can be fetched
    pub url: String,
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}
