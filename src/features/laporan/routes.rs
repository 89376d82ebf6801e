use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::laporan::handlers;
use crate::features::laporan::services::LaporanService;

/// Laporan routes. Reads and submission are public; the rest is guarded per handler.
pub fn routes(service: Arc<LaporanService>) -> Router {
    Router::new()
        .route(
            "/api/laporan",
            get(handlers::list_laporan).post(handlers::create_laporan),
        )
        .route("/api/laporan/stats", get(handlers::laporan_stats))
        .route("/api/laporan/me", get(handlers::my_laporan))
        .route(
            "/api/laporan/{id}",
            get(handlers::get_laporan)
                .put(handlers::update_laporan)
                .delete(handlers::delete_laporan),
        )
        .route(
            "/api/laporan/{id}/status",
            patch(handlers::update_laporan_status),
        )
        .with_state(service)
}
