use axum::{extract::Request, middleware::Next, response::Response, Router};
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

use crate::core::config::BackendConfig;
use crate::features::auth::models::AuthenticatedUser;
use crate::features::users::models::{User, UserRole};
use crate::modules::backend::BackendClient;

pub const ADMIN_ID: &str = "1";
pub const WARGA_ID: &str = "2";

fn authenticated(id: &str, name: &str, role: UserRole, backend_token: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        session_token: format!("session-{}", id),
        backend_token: backend_token.to_string(),
        user: User {
            id: id.to_string(),
            email: format!("{}@desa.id", name.to_lowercase()),
            name: name.to_string(),
            role,
            no_telp: None,
            alamat: None,
            created_at: None,
        },
    }
}

pub fn create_admin_user() -> AuthenticatedUser {
    authenticated(ADMIN_ID, "Admin", UserRole::Admin, "admin-backend-token")
}

pub fn create_warga_user() -> AuthenticatedUser {
    authenticated(WARGA_ID, "Budi", UserRole::Warga, "warga-backend-token")
}

async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

async fn inject_warga_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_warga_user());
    next.run(request).await
}

pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}

pub fn with_warga_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_warga_middleware))
}

/// Backend client pointed at a wiremock server
pub fn test_backend(server: &MockServer) -> Arc<BackendClient> {
    let config = BackendConfig {
        base_url: server.uri(),
        request_timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(1),
    };
    Arc::new(BackendClient::new(&config).unwrap())
}
