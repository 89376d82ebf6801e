use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::auth::models::AuthenticatedUser;
use crate::features::uploads::dtos::{ImageUpload, UploadImageDto, UploadResponseDto};
use crate::features::uploads::services::UploadService;
use crate::modules::backend::CallContext;
use crate::shared::types::ApiResponse;

/// Upload an image
///
/// Accepts multipart/form-data with a single `file` field.
#[utoipa::path(
    post,
    path = "/api/uploads",
    tag = "uploads",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Image for a laporan, wisata, UMKM or program",
    ),
    responses(
        (status = 201, description = "Image stored", body = ApiResponse<UploadResponseDto>),
        (status = 400, description = "Missing file, wrong type or too large"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_image(
    user: AuthenticatedUser,
    ctx: CallContext,
    State(service): State<Arc<UploadService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadResponseDto>>), AppError> {
    let mut upload: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Gagal membaca data multipart: {}", e))
    })? {
        if field.name() != Some("file") {
            debug!("Ignoring unknown field: {:?}", field.name());
            continue;
        }

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unnamed".to_string());
        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Gagal membaca file: {}", e))
        })?;

        upload = Some(ImageUpload {
            data: data.to_vec(),
            file_name,
            content_type,
        });
    }

    let upload = upload.ok_or_else(|| AppError::BadRequest("File wajib diunggah".to_string()))?;
    let response = service.upload_image(&ctx, upload, user.user_id()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(response),
            Some("File berhasil diunggah".to_string()),
            None,
        )),
    ))
}
