use reqwest::multipart::{Form, Part};
use std::sync::Arc;
use tracing::info;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::{BackendUploadResult, ImageUpload, UploadResponseDto};
use crate::modules::backend::{BackendClient, CallContext};

const UPLOAD_PATH: &str = "/upload";

/// Forwards checked images to the backend's storage endpoint
pub struct UploadService {
    backend: Arc<BackendClient>,
}

impl UploadService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    pub async fn upload_image(
        &self,
        ctx: &CallContext,
        upload: ImageUpload,
        user_id: &str,
    ) -> Result<UploadResponseDto> {
        upload.check().map_err(AppError::Validation)?;

        let size = upload.data.len();
        let part = Part::bytes(upload.data)
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .map_err(|e| AppError::BadRequest(format!("Tipe file tidak valid: {}", e)))?;
        let form = Form::new().part("file", part);

        let stored: BackendUploadResult = self.backend.post_multipart(ctx, UPLOAD_PATH, form).await?;

        info!(
            "User {} uploaded {} ({} bytes) -> {}",
            user_id, upload.file_name, size, stored.url
        );

        Ok(UploadResponseDto {
            url: stored.url,
            file_name: upload.file_name,
            content_type: upload.content_type,
            size,
        })
    }
}
