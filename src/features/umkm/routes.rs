use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::umkm::handlers;
use crate::features::umkm::services::UmkmService;

pub fn routes(service: Arc<UmkmService>) -> Router {
    Router::new()
        .route(
            "/api/umkm",
            get(handlers::list_umkm).post(handlers::create_umkm),
        )
        .route("/api/umkm/slug/{slug}", get(handlers::get_umkm_by_slug))
        .route(
            "/api/umkm/{id}",
            get(handlers::get_umkm)
                .put(handlers::update_umkm)
                .delete(handlers::delete_umkm),
        )
        .with_state(service)
}
