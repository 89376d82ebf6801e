use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::program::dtos::{CreateProgramDto, UpdateProgramDto};
use crate::features::program::models::Program;
use crate::features::program::services::ProgramService;
use crate::modules::backend::CallContext;
use crate::shared::filter::ListFilterQuery;
use crate::shared::types::{ApiResponse, Meta};

/// List development programs
#[utoipa::path(
    get,
    path = "/api/program",
    params(ListFilterQuery),
    responses(
        (status = 200, description = "Programs", body = ApiResponse<Vec<Program>>)
    ),
    tag = "program"
)]
pub async fn list_program(
    ctx: CallContext,
    State(service): State<Arc<ProgramService>>,
    Query(filter): Query<ListFilterQuery>,
) -> Result<Json<ApiResponse<Vec<Program>>>> {
    let programs = service.list(&ctx, &filter).await?;
    let meta = Meta::total(programs.len());
    Ok(Json(ApiResponse::success(Some(programs), None, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/program/{id}",
    params(("id" = String, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Program", body = ApiResponse<Program>),
        (status = 404, description = "Program not found")
    ),
    tag = "program"
)]
pub async fn get_program(
    ctx: CallContext,
    State(service): State<Arc<ProgramService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Program>>> {
    let program = service.get(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(Some(program), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/program",
    request_body = CreateProgramDto,
    responses(
        (status = 201, description = "Program created", body = ApiResponse<Program>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required")
    ),
    tag = "program",
    security(("bearer_auth" = []))
)]
pub async fn create_program(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<ProgramService>>,
    AppJson(dto): AppJson<CreateProgramDto>,
) -> Result<(StatusCode, Json<ApiResponse<Program>>)> {
    let program = service.create(&ctx, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(program),
            Some("Program berhasil ditambahkan".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/program/{id}",
    params(("id" = String, Path, description = "Program ID")),
    request_body = UpdateProgramDto,
    responses(
        (status = 200, description = "Program updated", body = ApiResponse<Program>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required")
    ),
    tag = "program",
    security(("bearer_auth" = []))
)]
pub async fn update_program(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<ProgramService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateProgramDto>,
) -> Result<Json<ApiResponse<Program>>> {
    let program = service.update(&ctx, &id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(program),
        Some("Program berhasil diperbarui".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/program/{id}",
    params(("id" = String, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Program deleted"),
        (status = 403, description = "Admin access required")
    ),
    tag = "program",
    security(("bearer_auth" = []))
)]
pub async fn delete_program(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<ProgramService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Program berhasil dihapus".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::features::program::routes;
    use crate::features::program::services::ProgramService;
    use crate::shared::test_helpers::{test_backend, with_admin_auth};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_progress_out_of_range_rejected_before_backend() {
        let backend = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&backend)
            .await;

        let service = Arc::new(ProgramService::new(test_backend(&backend)));
        let server = TestServer::new(with_admin_auth(routes::routes(service))).unwrap();

        let response = server
            .put("/api/program/3")
            .json(&json!({"progress": 150}))
            .await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["message"], "Progress harus antara 0 dan 100");
    }

    #[tokio::test]
    async fn test_malformed_backend_body_is_server_error() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/program/3"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&backend)
            .await;

        let service = Arc::new(ProgramService::new(test_backend(&backend)));
        let server = TestServer::new(routes::routes(service)).unwrap();

        let response = server.get("/api/program/3").await;
        response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["kind"], "server");
        assert_eq!(body["success"], false);
    }
}
