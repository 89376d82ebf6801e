use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, MaybeUser};
use crate::features::auth::guards::RequireAdmin;
use crate::features::wisata::dtos::{
    CoordinatesResponseDto, CreateWisataDto, ResolveCoordinatesDto, UpdateWisataDto,
};
use crate::features::wisata::models::Wisata;
use crate::features::wisata::services::WisataService;
use crate::modules::backend::CallContext;
use crate::shared::filter::ListFilterQuery;
use crate::shared::types::{ApiResponse, Meta};

fn is_admin(user: &MaybeUser) -> bool {
    user.0.as_ref().is_some_and(|u| u.is_admin())
}

/// List tourism destinations
#[utoipa::path(
    get,
    path = "/api/wisata",
    params(ListFilterQuery),
    responses(
        (status = 200, description = "Destinations (inactive ones only for admins)", body = ApiResponse<Vec<Wisata>>)
    ),
    tag = "wisata"
)]
pub async fn list_wisata(
    user: MaybeUser,
    ctx: CallContext,
    State(service): State<Arc<WisataService>>,
    Query(filter): Query<ListFilterQuery>,
) -> Result<Json<ApiResponse<Vec<Wisata>>>> {
    let items = service.list(&ctx, &filter, is_admin(&user)).await?;
    let meta = Meta::total(items.len());
    Ok(Json(ApiResponse::success(Some(items), None, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/wisata/{id}",
    params(("id" = String, Path, description = "Wisata ID")),
    responses(
        (status = 200, description = "Destination", body = ApiResponse<Wisata>),
        (status = 404, description = "Not found or inactive")
    ),
    tag = "wisata"
)]
pub async fn get_wisata(
    user: MaybeUser,
    ctx: CallContext,
    State(service): State<Arc<WisataService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Wisata>>> {
    let wisata = service.get(&ctx, &id, is_admin(&user)).await?;
    Ok(Json(ApiResponse::success(Some(wisata), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/wisata",
    request_body = CreateWisataDto,
    responses(
        (status = 201, description = "Destination created", body = ApiResponse<Wisata>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required")
    ),
    tag = "wisata",
    security(("bearer_auth" = []))
)]
pub async fn create_wisata(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<WisataService>>,
    AppJson(dto): AppJson<CreateWisataDto>,
) -> Result<(StatusCode, Json<ApiResponse<Wisata>>)> {
    let wisata = service.create(&ctx, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(wisata),
            Some("Wisata berhasil ditambahkan".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/wisata/{id}",
    params(("id" = String, Path, description = "Wisata ID")),
    request_body = UpdateWisataDto,
    responses(
        (status = 200, description = "Destination updated", body = ApiResponse<Wisata>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required")
    ),
    tag = "wisata",
    security(("bearer_auth" = []))
)]
pub async fn update_wisata(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<WisataService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateWisataDto>,
) -> Result<Json<ApiResponse<Wisata>>> {
    let wisata = service.update(&ctx, &id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(wisata),
        Some("Wisata berhasil diperbarui".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/wisata/{id}",
    params(("id" = String, Path, description = "Wisata ID")),
    responses(
        (status = 200, description = "Destination deleted"),
        (status = 403, description = "Admin access required")
    ),
    tag = "wisata",
    security(("bearer_auth" = []))
)]
pub async fn delete_wisata(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<WisataService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Wisata berhasil dihapus".to_string()),
        None,
    )))
}

/// Extract latitude/longitude from a Google Maps link (short links are expanded)
#[utoipa::path(
    post,
    path = "/api/wisata/coordinates",
    request_body = ResolveCoordinatesDto,
    responses(
        (status = 200, description = "Coordinates found", body = ApiResponse<CoordinatesResponseDto>),
        (status = 400, description = "Not a Google Maps link or no coordinates in it"),
        (status = 502, description = "Short link could not be expanded")
    ),
    tag = "wisata",
    security(("bearer_auth" = []))
)]
pub async fn resolve_coordinates(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<WisataService>>,
    AppJson(dto): AppJson<ResolveCoordinatesDto>,
) -> Result<Json<ApiResponse<CoordinatesResponseDto>>> {
    let coordinates = service.resolve_coordinates(dto).await?;
    Ok(Json(ApiResponse::success(Some(coordinates.into()), None, None)))
}

#[cfg(test)]
mod tests {
    use crate::features::wisata::routes;
    use crate::features::wisata::services::WisataService;
    use crate::modules::maps::CoordinateResolver;
    use crate::shared::test_helpers::{test_backend, with_admin_auth};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(backend: &MockServer) -> Arc<WisataService> {
        Arc::new(WisataService::new(
            test_backend(backend),
            Arc::new(CoordinateResolver::new().unwrap()),
        ))
    }

    async fn mount_wisata(backend: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/wisata"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [
                    {"id": 1, "nama": "Curug Cipendok", "deskripsi": "Air terjun", "lokasi": "Karangtengah", "kategori": "Alam", "harga": 15000, "isAktif": true},
                    {"id": 2, "nama": "Museum Desa", "deskripsi": "Sejarah", "lokasi": "Balai", "kategori": "Budaya", "harga": 0, "isAktif": false}
                ]
            })))
            .mount(backend)
            .await;
    }

    #[tokio::test]
    async fn test_public_list_hides_inactive() {
        let backend = MockServer::start().await;
        mount_wisata(&backend).await;

        let server = TestServer::new(routes::routes(service(&backend))).unwrap();
        let body: Value = server.get("/api/wisata").await.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["nama"], "Curug Cipendok");
    }

    #[tokio::test]
    async fn test_admin_list_includes_inactive() {
        let backend = MockServer::start().await;
        mount_wisata(&backend).await;

        let server = TestServer::new(with_admin_auth(routes::routes(service(&backend)))).unwrap();
        let body: Value = server
            .get("/api/wisata")
            .add_query_param("status", "nonaktif")
            .await
            .json();
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["nama"], "Museum Desa");
    }

    #[tokio::test]
    async fn test_resolve_coordinates_from_long_url() {
        let backend = MockServer::start().await;
        let server = TestServer::new(with_admin_auth(routes::routes(service(&backend)))).unwrap();

        let response = server
            .post("/api/wisata/coordinates")
            .json(&json!({"url": "https://www.google.com/maps/place/Baturraden/@-7.3127,109.2285,15z"}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["latitude"], -7.3127);
        assert_eq!(body["data"]["longitude"], 109.2285);
    }

    #[tokio::test]
    async fn test_resolve_coordinates_rejects_other_hosts() {
        let backend = MockServer::start().await;
        let server = TestServer::new(with_admin_auth(routes::routes(service(&backend)))).unwrap();

        let response = server
            .post("/api/wisata/coordinates")
            .json(&json!({"url": "https://www.openstreetmap.org/#map=15/-7.31/109.22"}))
            .await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["kind"], "validation");
    }
}
