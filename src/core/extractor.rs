use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use tokio_util::sync::CancellationToken;

use crate::core::error::AppError;
use crate::features::auth::models::AuthenticatedUser;
use crate::modules::backend::CallContext;

/// Custom JSON extractor that provides consistent error responses
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppJsonRejection(rejection)),
        }
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            JsonRejection::JsonDataError(err) => format!("Data JSON tidak valid: {}", err.body_text()),
            JsonRejection::JsonSyntaxError(err) => format!("Format JSON tidak valid: {}", err),
            JsonRejection::MissingJsonContentType(_) => {
                "Header Content-Type harus application/json".to_string()
            }
            _ => "Gagal membaca body JSON".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Silakan login terlebih dahulu".to_string()))
    }
}

/// Caller on routes where login is optional (e.g. guest laporan)
pub struct MaybeUser(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Process-wide shutdown token, installed as a request extension
#[derive(Clone, Default)]
pub struct AppShutdown(pub CancellationToken);

impl<S> FromRequestParts<S> for AppShutdown
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<AppShutdown>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Backend call context for this request.
///
/// Scoped to the shutdown token so backend calls abort when the server stops
/// or when the handler future is dropped (client disconnect). Carries the
/// caller's backend token when a session is present.
impl<S> FromRequestParts<S> for CallContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let shutdown = AppShutdown::from_request_parts(parts, state).await?;

        let ctx = CallContext::scoped(&shutdown.0);

        Ok(match parts.extensions.get::<AuthenticatedUser>() {
            Some(user) => ctx.with_bearer(user.backend_token.clone()),
            None => ctx,
        })
    }
}
