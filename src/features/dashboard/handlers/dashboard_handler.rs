use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::auth::guards::RequireAdmin;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::modules::backend::CallContext;
use crate::shared::types::ApiResponse;

// ============================================================================
// Home
// ============================================================================

/// Home page: weather, population and featured listings
#[utoipa::path(
    get,
    path = "/api/home",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Home page data", body = ApiResponse<HomeDto>)
    )
)]
pub async fn get_home(
    ctx: CallContext,
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<HomeDto>>, AppError> {
    let home = service.home(&ctx).await;
    Ok(Json(ApiResponse::success(Some(home), None, None)))
}

// ============================================================================
// Admin
// ============================================================================

/// Admin dashboard summary
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<AdminDashboardDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_admin_dashboard(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<AdminDashboardDto>>, AppError> {
    let summary = service.admin_summary(&ctx).await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

#[cfg(test)]
mod tests {
    use crate::features::dashboard::routes;
    use crate::features::dashboard::services::DashboardService;
    use crate::modules::weather::{CurrentWeather, WeatherError, WeatherProvider};
    use crate::shared::test_helpers::{test_backend, with_admin_auth, with_warga_auth};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixedWeather(Option<CurrentWeather>);

    #[async_trait]
    impl WeatherProvider for FixedWeather {
        async fn current(&self) -> Result<CurrentWeather, WeatherError> {
            self.0
                .clone()
                .ok_or_else(|| WeatherError::Request("offline".to_string()))
        }
    }

    fn sunny() -> CurrentWeather {
        CurrentWeather {
            temperature: 27.0,
            wind_speed: 3.0,
            weather_code: 0,
            description: "Cerah".to_string(),
            is_day: true,
            observed_at: None,
        }
    }

    fn router(backend: &MockServer, weather: Option<CurrentWeather>) -> Router {
        let service = Arc::new(DashboardService::new(
            test_backend(backend),
            Arc::new(FixedWeather(weather)),
        ));
        routes::routes(service)
    }

    async fn mount_list(backend: &MockServer, collection: &str, rows: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", collection)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": rows})),
            )
            .mount(backend)
            .await;
    }

    fn wisata(id: u32, aktif: bool) -> Value {
        json!({
            "id": id, "nama": format!("Wisata {}", id), "deskripsi": "-", "lokasi": "Desa",
            "kategori": "Alam", "harga": 10000, "isAktif": aktif
        })
    }

    #[tokio::test]
    async fn test_home_survives_failed_parts() {
        let backend = MockServer::start().await;
        let rows: Vec<Value> = (1..=8).map(|i| wisata(i, i != 2)).collect();
        mount_list(&backend, "wisata", json!(rows)).await;
        Mock::given(method("GET"))
            .and(path("/stats/penduduk"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&backend)
            .await;
        Mock::given(method("GET"))
            .and(path("/umkm"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&backend)
            .await;

        let server = TestServer::new(router(&backend, Some(sunny()))).unwrap();
        let response = server.get("/api/home").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["weather"]["description"], "Cerah");
        assert!(body["data"]["population"].is_null());
        assert!(body["data"]["featuredUmkm"].as_array().unwrap().is_empty());

        let featured = body["data"]["featuredWisata"].as_array().unwrap();
        assert_eq!(featured.len(), 6);
        assert!(featured.iter().all(|w| w["id"] != "2"));
    }

    #[tokio::test]
    async fn test_home_population_and_no_weather() {
        let backend = MockServer::start().await;
        mount_list(&backend, "wisata", json!([])).await;
        mount_list(&backend, "umkm", json!([])).await;
        Mock::given(method("GET"))
            .and(path("/stats/penduduk"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"totalPenduduk": 3120, "lakiLaki": 1540, "perempuan": 1580}
            })))
            .mount(&backend)
            .await;

        let server = TestServer::new(router(&backend, None)).unwrap();
        let body: Value = server.get("/api/home").await.json();

        assert!(body["data"]["weather"].is_null());
        assert_eq!(body["data"]["population"]["total"], 3120);
        assert_eq!(body["data"]["population"]["perempuan"], 1580);
    }

    #[tokio::test]
    async fn test_admin_dashboard_aggregates() {
        let backend = MockServer::start().await;
        mount_list(&backend, "users", json!([
            {"id": 1, "email": "admin@desa.id", "name": "Admin", "role": "ADMIN"}
        ]))
        .await;
        mount_list(&backend, "laporan", json!([
            {"id": 1, "judul": "Jalan rusak", "deskripsi": "-", "kategori": "Infrastruktur", "status": "PENDING", "lokasi": "RT 1"},
            {"id": 2, "judul": "Lampu mati", "deskripsi": "-", "kategori": "Infrastruktur", "status": "SELESAI", "lokasi": "RT 2"}
        ]))
        .await;
        mount_list(&backend, "program", json!([
            {"id": 1, "nama": "Jalan", "deskripsi": "-", "kategori": "Infrastruktur", "anggaran": 1000000,
             "sumberDana": "APBDes", "timeline": "2025", "status": "Berjalan", "progress": 40, "penanggungJawab": "Kaur"},
            {"id": 2, "nama": "Irigasi", "deskripsi": "-", "kategori": "Pertanian", "anggaran": 500000,
             "sumberDana": "APBDes", "timeline": "2025", "status": "Selesai", "progress": 100, "penanggungJawab": "Kaur"}
        ]))
        .await;
        mount_list(&backend, "wisata", json!([wisata(1, true)])).await;
        mount_list(&backend, "umkm", json!([])).await;
        mount_list(&backend, "transactions", json!([
            {"id": 1, "orderId": "A", "userId": 2, "wisataId": 1, "jumlahTiket": 2, "totalHarga": 20000,
             "tanggalKunjungan": "2025-06-01", "status": "PAID"},
            {"id": 2, "orderId": "B", "userId": 2, "wisataId": 1, "jumlahTiket": 1, "totalHarga": 10000,
             "tanggalKunjungan": "2025-06-01", "status": "PENDING"}
        ]))
        .await;

        let server = TestServer::new(with_admin_auth(router(&backend, None))).unwrap();
        let body: Value = server.get("/api/admin/dashboard").await.json();

        assert_eq!(body["data"]["counts"]["laporan"], 2);
        assert_eq!(body["data"]["counts"]["transactions"], 2);
        assert_eq!(body["data"]["laporan"]["pending"], 1);
        assert_eq!(body["data"]["averageProgress"], 70.0);
        assert_eq!(body["data"]["ticketRevenue"], 20000.0);
        assert_eq!(body["data"]["paidTransactions"], 1);
    }

    #[tokio::test]
    async fn test_admin_dashboard_forbidden_for_residents() {
        let backend = MockServer::start().await;
        let server = TestServer::new(with_warga_auth(router(&backend, None))).unwrap();
        server
            .get("/api/admin/dashboard")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
