use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::wisata::handlers;
use crate::features::wisata::services::WisataService;

pub fn routes(service: Arc<WisataService>) -> Router {
    Router::new()
        .route(
            "/api/wisata",
            get(handlers::list_wisata).post(handlers::create_wisata),
        )
        .route(
            "/api/wisata/coordinates",
            post(handlers::resolve_coordinates),
        )
        .route(
            "/api/wisata/{id}",
            get(handlers::get_wisata)
                .put(handlers::update_wisata)
                .delete(handlers::delete_wisata),
        )
        .with_state(service)
}
