use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::program::handlers;
use crate::features::program::services::ProgramService;

/// Program routes; writes are guarded by [`RequireAdmin`](crate::features::auth::guards::RequireAdmin)
pub fn routes(service: Arc<ProgramService>) -> Router {
    Router::new()
        .route(
            "/api/program",
            get(handlers::list_program).post(handlers::create_program),
        )
        .route(
            "/api/program/{id}",
            get(handlers::get_program)
                .put(handlers::update_program)
                .delete(handlers::delete_program),
        )
        .with_state(service)
}
