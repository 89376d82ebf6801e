use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, MaybeUser};
use crate::features::auth::guards::RequireAdmin;
use crate::features::umkm::dtos::{CreateUmkmDto, UmkmDetailDto, UmkmPageQuery, UpdateUmkmDto};
use crate::features::umkm::models::Umkm;
use crate::features::umkm::services::UmkmService;
use crate::modules::backend::CallContext;
use crate::shared::filter::ListFilterQuery;
use crate::shared::types::{ApiResponse, Meta};

fn is_admin(user: &MaybeUser) -> bool {
    user.0.as_ref().is_some_and(|u| u.is_admin())
}

/// Paged UMKM directory (9 per page)
#[utoipa::path(
    get,
    path = "/api/umkm",
    params(ListFilterQuery, UmkmPageQuery),
    responses(
        (status = 200, description = "One page of businesses", body = ApiResponse<Vec<Umkm>>)
    ),
    tag = "umkm"
)]
pub async fn list_umkm(
    user: MaybeUser,
    ctx: CallContext,
    State(service): State<Arc<UmkmService>>,
    Query(filter): Query<ListFilterQuery>,
    Query(page): Query<UmkmPageQuery>,
) -> Result<Json<ApiResponse<Vec<Umkm>>>> {
    let (items, pagination) = service
        .list_page(&ctx, &filter, &page.pagination(), is_admin(&user))
        .await?;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta::paginated(pagination)),
    )))
}

#[utoipa::path(
    get,
    path = "/api/umkm/slug/{slug}",
    params(("slug" = String, Path, description = "UMKM slug")),
    responses(
        (status = 200, description = "Business detail", body = ApiResponse<UmkmDetailDto>),
        (status = 404, description = "Not found")
    ),
    tag = "umkm"
)]
pub async fn get_umkm_by_slug(
    user: MaybeUser,
    ctx: CallContext,
    State(service): State<Arc<UmkmService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<UmkmDetailDto>>> {
    let umkm = service.get_by_slug(&ctx, &slug, is_admin(&user)).await?;
    Ok(Json(ApiResponse::success(Some(umkm.into()), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/umkm/{id}",
    params(("id" = String, Path, description = "UMKM ID")),
    responses(
        (status = 200, description = "Business", body = ApiResponse<UmkmDetailDto>),
        (status = 404, description = "Not found")
    ),
    tag = "umkm",
    security(("bearer_auth" = []))
)]
pub async fn get_umkm(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<UmkmService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UmkmDetailDto>>> {
    let umkm = service.get(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(Some(umkm.into()), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/umkm",
    request_body = CreateUmkmDto,
    responses(
        (status = 201, description = "Business created", body = ApiResponse<Umkm>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Slug already used")
    ),
    tag = "umkm",
    security(("bearer_auth" = []))
)]
pub async fn create_umkm(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<UmkmService>>,
    AppJson(dto): AppJson<CreateUmkmDto>,
) -> Result<(StatusCode, Json<ApiResponse<Umkm>>)> {
    let umkm = service.create(&ctx, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(umkm),
            Some("UMKM berhasil ditambahkan".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/umkm/{id}",
    params(("id" = String, Path, description = "UMKM ID")),
    request_body = UpdateUmkmDto,
    responses(
        (status = 200, description = "Business updated", body = ApiResponse<Umkm>),
        (status = 400, description = "Validation error")
    ),
    tag = "umkm",
    security(("bearer_auth" = []))
)]
pub async fn update_umkm(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<UmkmService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateUmkmDto>,
) -> Result<Json<ApiResponse<Umkm>>> {
    let umkm = service.update(&ctx, &id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(umkm),
        Some("UMKM berhasil diperbarui".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/umkm/{id}",
    params(("id" = String, Path, description = "UMKM ID")),
    responses(
        (status = 200, description = "Business deleted")
    ),
    tag = "umkm",
    security(("bearer_auth" = []))
)]
pub async fn delete_umkm(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<UmkmService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("UMKM berhasil dihapus".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::features::umkm::routes;
    use crate::features::umkm::services::UmkmService;
    use crate::shared::test_helpers::test_backend;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn umkm_rows(n: usize) -> Value {
        let rows: Vec<Value> = (1..=n)
            .map(|i| {
                json!({
                    "id": i,
                    "nama": format!("Warung {}", i),
                    "slug": format!("warung-{}", i),
                    "pemilik": "Pak Tani",
                    "deskripsi": "Jajanan",
                    "kategori": if i % 2 == 0 { "Kuliner" } else { "Kerajinan" },
                    "alamat": "Desa",
                    "kontak": "081234567890",
                    "produk": "Makanan",
                    "harga": 5000
                })
            })
            .collect();
        json!({"success": true, "data": rows})
    }

    async fn server_with(n: usize) -> (MockServer, TestServer) {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/umkm"))
            .respond_with(ResponseTemplate::new(200).set_body_json(umkm_rows(n)))
            .mount(&backend)
            .await;
        let service = Arc::new(UmkmService::new(test_backend(&backend)));
        let server = TestServer::new(routes::routes(service)).unwrap();
        (backend, server)
    }

    #[tokio::test]
    async fn test_pages_of_nine() {
        let (_backend, server) = server_with(20).await;

        let first: Value = server.get("/api/umkm").await.json();
        assert_eq!(first["data"].as_array().unwrap().len(), 9);
        assert_eq!(first["meta"]["pagination"]["totalPages"], 3);
        assert_eq!(first["meta"]["pagination"]["pageSize"], 9);

        let last: Value = server.get("/api/umkm").add_query_param("page", 3).await.json();
        assert_eq!(last["data"].as_array().unwrap().len(), 20 % 9);
        assert_eq!(last["data"][0]["nama"], "Warung 19");

        let beyond: Value = server.get("/api/umkm").add_query_param("page", 4).await.json();
        assert!(beyond["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filter_applies_before_paging() {
        let (_backend, server) = server_with(20).await;

        let body: Value = server
            .get("/api/umkm")
            .add_query_param("kategori", "Kuliner")
            .await
            .json();
        assert_eq!(body["meta"]["pagination"]["totalItems"], 10);
        assert_eq!(body["meta"]["pagination"]["totalPages"], 2);
    }

    #[tokio::test]
    async fn test_detail_by_slug_includes_whatsapp() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/umkm/slug/warung-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "id": 1, "nama": "Warung 1", "slug": "warung-1", "pemilik": "Pak Tani",
                    "deskripsi": "Jajanan", "kategori": "Kuliner", "alamat": "Desa",
                    "kontak": "081234567890", "produk": "Makanan", "harga": 5000
                }
            })))
            .mount(&backend)
            .await;

        let service = Arc::new(UmkmService::new(test_backend(&backend)));
        let server = TestServer::new(routes::routes(service)).unwrap();

        let body: Value = server.get("/api/umkm/slug/warung-1").await.json();
        assert_eq!(body["data"]["slug"], "warung-1");
        assert_eq!(body["data"]["whatsappUrl"], "https://wa.me/6281234567890");
    }
}
