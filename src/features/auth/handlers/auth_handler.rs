use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    LoginRequestDto, RegisterRequestDto, RegisterResponseDto, SessionDto,
};
use crate::features::auth::models::AuthenticatedUser;
use crate::features::auth::outcome::AuthOutcome;
use crate::features::auth::services::AuthService;
use crate::features::users::models::User;
use crate::modules::backend::CallContext;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Register a resident account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 200, description = "Registered", body = ApiResponse<RegisterResponseDto>),
        (status = 400, description = "Validation error (e.g. \"Password tidak sama\")"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    ctx: CallContext,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> AuthOutcome<RegisterResponseDto> {
    service.register(&ctx, dto).await
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<SessionDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    ctx: CallContext,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> AuthOutcome<SessionDto> {
    service.login(&ctx, dto).await
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> AuthOutcome<()> {
    service.logout(&user).await
}

/// Get the logged-in user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<User>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    ctx: CallContext,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<User>>> {
    let profile = service.current_user(&ctx, &user).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}
