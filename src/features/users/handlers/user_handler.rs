use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto};
use crate::features::users::models::User;
use crate::features::users::services::UserService;
use crate::modules::backend::CallContext;
use crate::shared::filter::ListFilterQuery;
use crate::shared::types::{ApiResponse, Meta};

/// List users, filtered by name/email search and role
#[utoipa::path(
    get,
    path = "/api/users",
    params(ListFilterQuery),
    responses(
        (status = 200, description = "Users", body = ApiResponse<Vec<User>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<UserService>>,
    Query(filter): Query<ListFilterQuery>,
) -> Result<Json<ApiResponse<Vec<User>>>> {
    let users = service.list(&ctx, &filter).await?;
    let meta = Meta::total(users.len());
    Ok(Json(ApiResponse::success(Some(users), None, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = ApiResponse<User>),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<UserService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>> {
    let user = service.get(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = ApiResponse<User>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<CreateUserDto>,
) -> Result<(StatusCode, Json<ApiResponse<User>>)> {
    let user = service.create(&ctx, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(user),
            Some("Pengguna berhasil ditambahkan".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<User>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<UserService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateUserDto>,
) -> Result<Json<ApiResponse<User>>> {
    let user = service.update(&ctx, &id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(user),
        Some("Pengguna berhasil diperbarui".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Cannot delete own account"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<UserService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&ctx, &admin, &id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Pengguna berhasil dihapus".to_string()),
        None,
    )))
}
