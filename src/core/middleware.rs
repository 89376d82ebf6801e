use crate::core::error::AppError;
use crate::features::auth::models::AuthenticatedUser;
use crate::features::auth::SessionStore;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        // Parse origins into HeaderValue
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok());

            if let Some(auth_header) = auth_header {
                if let Some(encoded) = auth_header.strip_prefix("Basic ") {
                    if let Ok(decoded) = BASE64_STANDARD.decode(encoded) {
                        if let Ok(creds) = String::from_utf8(decoded) {
                            if creds == *credentials {
                                return Ok(next.run(req).await);
                            }
                        }
                    }
                }
            }

            Err((
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")],
                "Unauthorized",
            )
                .into_response())
        })
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

async fn resolve_session(store: &SessionStore, token: &str) -> Option<AuthenticatedUser> {
    store.get(token).await.map(|session| AuthenticatedUser {
        session_token: session.token,
        backend_token: session.backend_token,
        user: session.user,
    })
}

/// Require a live session and attach the user to the request
pub async fn auth_middleware(
    State(store): State<Arc<SessionStore>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&req)
        .ok_or_else(|| AppError::Unauthorized("Silakan login terlebih dahulu".to_string()))?;

    let user = resolve_session(&store, token).await.ok_or_else(|| {
        AppError::Unauthorized("Sesi tidak valid atau sudah berakhir".to_string())
    })?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Attach the user when a valid session is presented, otherwise continue as guest
pub async fn optional_auth_middleware(
    State(store): State<Arc<SessionStore>>,
    mut req: Request,
    next: Next,
) -> Response {
    let user = match bearer_token(&req) {
        Some(token) => resolve_session(&store, token).await,
        None => None,
    };

    if let Some(user) = user {
        req.extensions_mut().insert(user);
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extractor::MaybeUser;
    use crate::features::users::models::{User, UserRole};
    use axum::{middleware::from_fn_with_state, routing::get, Router};
    use axum_test::TestServer;
    use std::time::Duration;

    async fn whoami(MaybeUser(user): MaybeUser) -> String {
        user.map(|u| u.user.name)
            .unwrap_or_else(|| "guest".to_string())
    }

    fn user() -> User {
        User {
            id: "1".to_string(),
            email: "sari@desa.id".to_string(),
            name: "Sari".to_string(),
            role: UserRole::Warga,
            no_telp: None,
            alamat: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_auth_middleware_requires_session() {
        let store = Arc::new(SessionStore::new(Duration::from_secs(60)));
        let session = store.create("backend".to_string(), user()).await;
        let app = Router::new()
            .route("/me", get(whoami))
            .layer(from_fn_with_state(store, auth_middleware));
        let server = TestServer::new(app).unwrap();

        let response = server.get("/me").await;
        response.assert_status_unauthorized();

        let response = server
            .get("/me")
            .authorization_bearer("not-a-session")
            .await;
        response.assert_status_unauthorized();

        let response = server
            .get("/me")
            .authorization_bearer(&session.token)
            .await;
        response.assert_status_ok();
        response.assert_text("Sari");
    }

    #[tokio::test]
    async fn test_optional_auth_middleware_allows_guests() {
        let store = Arc::new(SessionStore::new(Duration::from_secs(60)));
        let session = store.create("backend".to_string(), user()).await;
        let app = Router::new()
            .route("/me", get(whoami))
            .layer(from_fn_with_state(store, optional_auth_middleware));
        let server = TestServer::new(app).unwrap();

        server.get("/me").await.assert_text("guest");
        server
            .get("/me")
            .authorization_bearer("stale")
            .await
            .assert_text("guest");
        server
            .get("/me")
            .authorization_bearer(&session.token)
            .await
            .assert_text("Sari");
    }
}
