use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Home page and admin dashboard routes
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/home", get(handlers::get_home))
        .route("/api/admin/dashboard", get(handlers::get_admin_dashboard))
        .with_state(dashboard_service)
}
