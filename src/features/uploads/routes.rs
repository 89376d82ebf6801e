use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::uploads::handlers::upload_image;
use crate::features::uploads::services::UploadService;
use crate::shared::constants::MAX_UPLOAD_BYTES;

pub fn routes(upload_service: Arc<UploadService>) -> Router {
    Router::new()
        .route(
            "/api/uploads",
            // Multipart overhead on top of the image limit
            post(upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 1024 * 1024)),
        )
        .with_state(upload_service)
}
