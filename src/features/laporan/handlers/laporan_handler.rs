use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, MaybeUser};
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::models::AuthenticatedUser;
use crate::features::laporan::dtos::{CreateLaporanDto, UpdateLaporanDto, UpdateLaporanStatusDto};
use crate::features::laporan::models::{Laporan, LaporanStats};
use crate::features::laporan::services::LaporanService;
use crate::modules::backend::CallContext;
use crate::shared::filter::ListFilterQuery;
use crate::shared::types::{ApiResponse, Meta};

/// List laporan with search, status and kategori filters
#[utoipa::path(
    get,
    path = "/api/laporan",
    params(ListFilterQuery),
    responses(
        (status = 200, description = "Filtered laporan", body = ApiResponse<Vec<Laporan>>)
    ),
    tag = "laporan"
)]
pub async fn list_laporan(
    ctx: CallContext,
    State(service): State<Arc<LaporanService>>,
    Query(filter): Query<ListFilterQuery>,
) -> Result<Json<ApiResponse<Vec<Laporan>>>> {
    let items = service.list(&ctx, &filter).await?;
    let meta = Meta::total(items.len());
    Ok(Json(ApiResponse::success(Some(items), None, Some(meta))))
}

/// Counts per status for the stat cards
#[utoipa::path(
    get,
    path = "/api/laporan/stats",
    params(ListFilterQuery),
    responses(
        (status = 200, description = "Laporan counts per status", body = ApiResponse<LaporanStats>)
    ),
    tag = "laporan"
)]
pub async fn laporan_stats(
    ctx: CallContext,
    State(service): State<Arc<LaporanService>>,
    Query(filter): Query<ListFilterQuery>,
) -> Result<Json<ApiResponse<LaporanStats>>> {
    let stats = service.stats(&ctx, &filter).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Laporan submitted by the logged-in user
#[utoipa::path(
    get,
    path = "/api/laporan/me",
    responses(
        (status = 200, description = "Own laporan", body = ApiResponse<Vec<Laporan>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "laporan",
    security(("bearer_auth" = []))
)]
pub async fn my_laporan(
    user: AuthenticatedUser,
    ctx: CallContext,
    State(service): State<Arc<LaporanService>>,
) -> Result<Json<ApiResponse<Vec<Laporan>>>> {
    let items = service.mine(&ctx, &user).await?;
    let meta = Meta::total(items.len());
    Ok(Json(ApiResponse::success(Some(items), None, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/laporan/{id}",
    params(("id" = String, Path, description = "Laporan ID")),
    responses(
        (status = 200, description = "Laporan", body = ApiResponse<Laporan>),
        (status = 404, description = "Laporan not found")
    ),
    tag = "laporan"
)]
pub async fn get_laporan(
    ctx: CallContext,
    State(service): State<Arc<LaporanService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Laporan>>> {
    let laporan = service.get(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(Some(laporan), None, None)))
}

/// Submit a complaint. Guests are allowed; a logged-in reporter is attached.
#[utoipa::path(
    post,
    path = "/api/laporan",
    request_body = CreateLaporanDto,
    responses(
        (status = 201, description = "Laporan submitted", body = ApiResponse<Laporan>),
        (status = 400, description = "Validation error")
    ),
    tag = "laporan"
)]
pub async fn create_laporan(
    MaybeUser(user): MaybeUser,
    ctx: CallContext,
    State(service): State<Arc<LaporanService>>,
    AppJson(dto): AppJson<CreateLaporanDto>,
) -> Result<(StatusCode, Json<ApiResponse<Laporan>>)> {
    let laporan = service.create(&ctx, user.as_ref(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(laporan),
            Some("Laporan berhasil dikirim".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/laporan/{id}",
    params(("id" = String, Path, description = "Laporan ID")),
    request_body = UpdateLaporanDto,
    responses(
        (status = 200, description = "Laporan updated", body = ApiResponse<Laporan>),
        (status = 403, description = "Admin access required")
    ),
    tag = "laporan",
    security(("bearer_auth" = []))
)]
pub async fn update_laporan(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<LaporanService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateLaporanDto>,
) -> Result<Json<ApiResponse<Laporan>>> {
    let laporan = service.update(&ctx, &id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(laporan),
        Some("Laporan berhasil diperbarui".to_string()),
        None,
    )))
}

/// Set status and response (tanggapan)
#[utoipa::path(
    patch,
    path = "/api/laporan/{id}/status",
    params(("id" = String, Path, description = "Laporan ID")),
    request_body = UpdateLaporanStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<Laporan>),
        (status = 403, description = "Admin access required")
    ),
    tag = "laporan",
    security(("bearer_auth" = []))
)]
pub async fn update_laporan_status(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<LaporanService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateLaporanStatusDto>,
) -> Result<Json<ApiResponse<Laporan>>> {
    let laporan = service.update_status(&ctx, &id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(laporan),
        Some("Status laporan diperbarui".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/laporan/{id}",
    params(("id" = String, Path, description = "Laporan ID")),
    responses(
        (status = 200, description = "Laporan deleted"),
        (status = 403, description = "Admin access required")
    ),
    tag = "laporan",
    security(("bearer_auth" = []))
)]
pub async fn delete_laporan(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<LaporanService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&ctx, &id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Laporan berhasil dihapus".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::features::laporan::routes;
    use crate::features::laporan::services::LaporanService;
    use crate::shared::test_helpers::{test_backend, with_admin_auth, with_warga_auth, WARGA_ID};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn laporan_list() -> Value {
        json!({
            "success": true,
            "data": [
                {"id": 1, "judul": "Jalan berlubang", "deskripsi": "Depan balai", "kategori": "Infrastruktur", "status": "PENDING", "lokasi": "RT 01"},
                {"id": 2, "judul": "Lampu mati", "deskripsi": "Jalan desa", "kategori": "Infrastruktur", "status": "PROSES", "lokasi": "RT 02", "user": {"id": 2, "name": "Budi"}},
                {"id": 3, "judul": "Sampah", "deskripsi": "Sungai", "kategori": "Kebersihan", "status": "SELESAI", "lokasi": "RT 03"},
                {"id": 4, "judul": "Banjir", "deskripsi": "Jalan tergenang", "kategori": "Bencana", "status": "DITOLAK", "lokasi": "RT 01"}
            ]
        })
    }

    fn server_for(backend: &MockServer) -> TestServer {
        let service = Arc::new(LaporanService::new(test_backend(backend)));
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_list_with_combined_filters() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/laporan"))
            .respond_with(ResponseTemplate::new(200).set_body_json(laporan_list()))
            .mount(&backend)
            .await;

        let response = server_for(&backend)
            .get("/api/laporan")
            .add_query_param("search", "jalan")
            .add_query_param("kategori", "Infrastruktur")
            .add_query_param("status", "semua")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let ids: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_stats_counts_each_status() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/laporan"))
            .respond_with(ResponseTemplate::new(200).set_body_json(laporan_list()))
            .mount(&backend)
            .await;

        let response = server_for(&backend).get("/api/laporan/stats").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body["data"],
            json!({"total": 4, "pending": 1, "proses": 1, "selesai": 1, "ditolak": 1})
        );
    }

    #[tokio::test]
    async fn test_guest_submission_has_null_user() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/laporan"))
            .and(body_partial_json(json!({"judul": "Jembatan retak", "userId": null})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "data": {"id": 9, "judul": "Jembatan retak", "deskripsi": "Retak", "kategori": "Infrastruktur", "status": "PENDING", "lokasi": "Dusun 2", "user": null}
            })))
            .expect(1)
            .mount(&backend)
            .await;

        let response = server_for(&backend)
            .post("/api/laporan")
            .json(&json!({
                "judul": "Jembatan retak",
                "deskripsi": "Retak",
                "kategori": "Infrastruktur",
                "lokasi": "Dusun 2"
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = response.json();
        assert!(body["data"]["user"].is_null());
    }

    #[tokio::test]
    async fn test_logged_in_submission_attaches_user() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/laporan"))
            .and(header("authorization", "Bearer warga-backend-token"))
            .and(body_partial_json(json!({"userId": WARGA_ID})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "data": {"id": 10, "judul": "Air keruh", "deskripsi": "PAM", "kategori": "Air", "status": "PENDING", "lokasi": "RT 04", "user": {"id": 2, "name": "Budi"}}
            })))
            .expect(1)
            .mount(&backend)
            .await;

        let service = Arc::new(LaporanService::new(test_backend(&backend)));
        let server = TestServer::new(with_warga_auth(routes::routes(service))).unwrap();

        let response = server
            .post("/api/laporan")
            .json(&json!({
                "judul": "Air keruh",
                "deskripsi": "PAM",
                "kategori": "Air",
                "lokasi": "RT 04"
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_status_update_requires_admin() {
        let backend = MockServer::start().await;
        let service = Arc::new(LaporanService::new(test_backend(&backend)));

        let guest = TestServer::new(routes::routes(Arc::clone(&service))).unwrap();
        guest
            .patch("/api/laporan/1/status")
            .json(&json!({"status": "SELESAI"}))
            .await
            .assert_status_unauthorized();

        let warga = TestServer::new(with_warga_auth(routes::routes(service))).unwrap();
        warga
            .patch("/api/laporan/1/status")
            .json(&json!({"status": "SELESAI"}))
            .await
            .assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_admin_status_update_forwards_tanggapan() {
        let backend = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/laporan/1/status"))
            .and(body_partial_json(json!({"status": "SELESAI", "tanggapan": "Sudah diperbaiki"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"id": 1, "judul": "Jalan berlubang", "deskripsi": "Depan balai", "kategori": "Infrastruktur", "status": "SELESAI", "lokasi": "RT 01", "tanggapan": "Sudah diperbaiki"}
            })))
            .expect(1)
            .mount(&backend)
            .await;

        let service = Arc::new(LaporanService::new(test_backend(&backend)));
        let server = TestServer::new(with_admin_auth(routes::routes(service))).unwrap();

        let response = server
            .patch("/api/laporan/1/status")
            .json(&json!({"status": "SELESAI", "tanggapan": "Sudah diperbaiki"}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["status"], "SELESAI");
    }
}
