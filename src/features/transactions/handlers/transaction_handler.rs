use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive},
        IntoResponse, Response, Sse,
    },
    Json,
};
use futures::stream::{self, BoxStream, StreamExt};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppShutdown};
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::models::AuthenticatedUser;
use crate::features::transactions::dtos::{PaymentStatusView, PurchaseTicketDto};
use crate::features::transactions::models::Transaction;
use crate::features::transactions::services::{CountdownFeed, TransactionService};
use crate::modules::backend::CallContext;
use crate::shared::countdown::{Countdown, RedirectTick};
use crate::shared::filter::ListFilterQuery;
use crate::shared::types::{ApiResponse, Meta};

/// Buy tickets for a wisata visit
#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = PurchaseTicketDto,
    responses(
        (status = 201, description = "Order created, awaiting payment", body = ApiResponse<Transaction>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "transactions",
    security(("bearer_auth" = []))
)]
pub async fn purchase_ticket(
    user: AuthenticatedUser,
    ctx: CallContext,
    State(service): State<Arc<TransactionService>>,
    AppJson(dto): AppJson<PurchaseTicketDto>,
) -> Result<(StatusCode, Json<ApiResponse<Transaction>>)> {
    let transaction = service.purchase(&ctx, &user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(transaction),
            Some("Pesanan tiket berhasil dibuat".to_string()),
            None,
        )),
    ))
}

/// Admin list of all orders
#[utoipa::path(
    get,
    path = "/api/transactions",
    params(ListFilterQuery),
    responses(
        (status = 200, description = "Orders", body = ApiResponse<Vec<Transaction>>),
        (status = 403, description = "Admin only")
    ),
    tag = "transactions",
    security(("bearer_auth" = []))
)]
pub async fn list_transactions(
    RequireAdmin(_admin): RequireAdmin,
    ctx: CallContext,
    State(service): State<Arc<TransactionService>>,
    Query(filter): Query<ListFilterQuery>,
) -> Result<Json<ApiResponse<Vec<Transaction>>>> {
    let items = service.list(&ctx, &filter).await?;
    let total = items.len();
    Ok(Json(ApiResponse::success(Some(items), None, Some(Meta::total(total)))))
}

#[utoipa::path(
    get,
    path = "/api/transactions/me",
    responses(
        (status = 200, description = "Caller's orders", body = ApiResponse<Vec<Transaction>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "transactions",
    security(("bearer_auth" = []))
)]
pub async fn my_transactions(
    user: AuthenticatedUser,
    ctx: CallContext,
    State(service): State<Arc<TransactionService>>,
) -> Result<Json<ApiResponse<Vec<Transaction>>>> {
    let items = service.mine(&ctx, &user).await?;
    let total = items.len();
    Ok(Json(ApiResponse::success(Some(items), None, Some(Meta::total(total)))))
}

/// Ticket detail
#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    params(("id" = String, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Ticket", body = ApiResponse<Transaction>),
        (status = 404, description = "Not found")
    ),
    tag = "transactions",
    security(("bearer_auth" = []))
)]
pub async fn get_transaction(
    user: AuthenticatedUser,
    ctx: CallContext,
    State(service): State<Arc<TransactionService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Transaction>>> {
    let transaction = service.get_for(&ctx, &user, &id).await?;
    Ok(Json(ApiResponse::success(Some(transaction), None, None)))
}

/// Payment status for the success/pending pages
#[utoipa::path(
    get,
    path = "/api/transactions/order/{order_id}",
    params(("order_id" = String, Path, description = "Gateway order ID")),
    responses(
        (status = 200, description = "Payment status", body = ApiResponse<PaymentStatusView>),
        (status = 404, description = "Order not found")
    ),
    tag = "transactions"
)]
pub async fn payment_status(
    ctx: CallContext,
    State(service): State<Arc<TransactionService>>,
    Path(order_id): Path<String>,
) -> Result<Json<ApiResponse<PaymentStatusView>>> {
    let view = service.payment_status(&ctx, &order_id).await?;
    Ok(Json(ApiResponse::success(Some(view), None, None)))
}

fn feed_events(feed: CountdownFeed) -> BoxStream<'static, std::result::Result<Event, Infallible>> {
    match feed {
        CountdownFeed::Expiry(ticks) => ticks
            .map(|state| {
                let name = if state == Countdown::Expired { "expired" } else { "tick" };
                Ok(Event::default().event(name).data(state.to_string()))
            })
            .boxed(),
        CountdownFeed::Redirect { ticks, ticket_path } => ticks
            .map(move |tick| {
                Ok(match tick {
                    RedirectTick::SecondsLeft(left) => {
                        Event::default().event("redirect-tick").data(left.to_string())
                    }
                    RedirectTick::Redirect => Event::default().event("redirect").data(&ticket_path),
                })
            })
            .boxed(),
        CountdownFeed::Settled(status) => {
            stream::once(async move { Ok(Event::default().event("status").data(status.as_str())) })
                .boxed()
        }
    }
}

/// Live countdown as Server-Sent Events.
///
/// Pending orders emit `tick` every second then a final `expired`; paid
/// orders emit `redirect-tick` 10..1 then `redirect` with the ticket path.
#[utoipa::path(
    get,
    path = "/api/transactions/order/{order_id}/countdown",
    params(("order_id" = String, Path, description = "Gateway order ID")),
    responses(
        (status = 200, description = "SSE countdown stream", content_type = "text/event-stream"),
        (status = 404, description = "Order not found")
    ),
    tag = "transactions"
)]
pub async fn payment_countdown(
    shutdown: AppShutdown,
    ctx: CallContext,
    State(service): State<Arc<TransactionService>>,
    Path(order_id): Path<String>,
) -> Result<Response> {
    let transaction = service.get_by_order_id(&ctx, &order_id).await?;
    let feed = service.countdown(&transaction, shutdown.0.child_token());

    let sse = Sse::new(feed_events(feed)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    );

    Ok(sse.into_response())
}

#[cfg(test)]
mod tests {
    use crate::features::transactions::routes;
    use crate::features::transactions::services::TransactionService;
    use crate::shared::test_helpers::{test_backend, with_admin_auth, with_warga_auth};
    use axum::http::StatusCode;
    use axum::Router;
    use axum_test::TestServer;
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn order(id: u32, user_id: &str, status: &str, expiry: Option<String>) -> Value {
        json!({
            "id": id,
            "orderId": format!("ORDER-{}", id),
            "userId": user_id,
            "wisataId": 3,
            "jumlahTiket": 2,
            "totalHarga": 20000,
            "tanggalKunjungan": "2025-06-01",
            "status": status,
            "vaNumber": "8808123456789",
            "bank": "bca",
            "paymentType": "bank_transfer",
            "expiryTime": expiry
        })
    }

    fn router(backend: &MockServer) -> Router {
        let service = Arc::new(TransactionService::new(
            test_backend(backend),
            "http://desa.test".to_string(),
        ));
        routes::routes(service)
    }

    async fn mount_order(backend: &MockServer, body: Value) {
        let order_id = body["orderId"].as_str().unwrap().to_string();
        Mock::given(method("GET"))
            .and(path(format!("/transactions/order/{}", order_id)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": body})),
            )
            .mount(backend)
            .await;
    }

    #[tokio::test]
    async fn test_pending_status_has_countdown_and_va() {
        let backend = MockServer::start().await;
        let expiry = (Utc::now() + Duration::hours(2)).to_rfc3339();
        mount_order(&backend, order(12, "2", "PENDING", Some(expiry))).await;

        let server = TestServer::new(router(&backend)).unwrap();
        let body: Value = server.get("/api/transactions/order/ORDER-12").await.json();

        let countdown = body["data"]["countdown"].as_str().unwrap();
        assert!(countdown.starts_with("01:59:") || countdown == "02:00:00");
        assert_eq!(body["data"]["expired"], false);
        assert_eq!(body["data"]["payment"]["vaNumber"], "8808123456789");
    }

    #[tokio::test]
    async fn test_paid_status_points_at_ticket() {
        let backend = MockServer::start().await;
        mount_order(&backend, order(12, "2", "PAID", None)).await;

        let server = TestServer::new(router(&backend)).unwrap();
        let body: Value = server.get("/api/transactions/order/ORDER-12").await.json();

        assert_eq!(body["data"]["redirect"]["ticketPath"], "/tiket/12");
        assert_eq!(body["data"]["redirect"]["ticketUrl"], "http://desa.test/tiket/12");
        assert_eq!(body["data"]["redirect"]["seconds"], 10);
    }

    #[tokio::test]
    async fn test_countdown_stream_for_expired_order_ends_with_expired() {
        let backend = MockServer::start().await;
        let expiry = (Utc::now() - Duration::minutes(5)).to_rfc3339();
        mount_order(&backend, order(12, "2", "PENDING", Some(expiry))).await;

        let server = TestServer::new(router(&backend)).unwrap();
        let response = server.get("/api/transactions/order/ORDER-12/countdown").await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains("event: expired"));
        assert!(text.contains("data: Expired"));
        assert!(!text.contains("event: tick"));
    }

    #[tokio::test]
    async fn test_countdown_stream_for_cancelled_order() {
        let backend = MockServer::start().await;
        mount_order(&backend, order(12, "2", "CANCELLED", None)).await;

        let server = TestServer::new(router(&backend)).unwrap();
        let text = server
            .get("/api/transactions/order/ORDER-12/countdown")
            .await
            .text();

        assert!(text.contains("event: status"));
        assert!(text.contains("data: CANCELLED"));
    }

    #[tokio::test]
    async fn test_purchase_prices_from_wisata() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wisata/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "id": 3, "nama": "Curug Cipendok", "deskripsi": "Air terjun",
                    "lokasi": "Karanglewas", "kategori": "Alam", "harga": 15000
                }
            })))
            .mount(&backend)
            .await;
        Mock::given(method("POST"))
            .and(path("/transactions"))
            .and(header("authorization", "Bearer warga-backend-token"))
            .and(body_partial_json(json!({
                "userId": "2",
                "wisataId": "3",
                "jumlahTiket": 2,
                "totalHarga": 30000.0
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "data": order(40, "2", "PENDING", None)
            })))
            .expect(1)
            .mount(&backend)
            .await;

        let server = TestServer::new(with_warga_auth(router(&backend))).unwrap();
        let response = server
            .post("/api/transactions")
            .json(&json!({"wisataId": 3, "jumlahTiket": 2, "tanggalKunjungan": "2999-01-01"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["orderId"], "ORDER-40");
    }

    #[tokio::test]
    async fn test_purchase_requires_login() {
        let backend = MockServer::start().await;
        let server = TestServer::new(router(&backend)).unwrap();

        let response = server
            .post("/api/transactions")
            .json(&json!({"wisataId": 3, "jumlahTiket": 2, "tanggalKunjungan": "2999-01-01"}))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_ticket_hidden_from_other_residents() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transactions/12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": order(12, "99", "PAID", None)
            })))
            .mount(&backend)
            .await;

        let warga = TestServer::new(with_warga_auth(router(&backend))).unwrap();
        warga
            .get("/api/transactions/12")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let admin = TestServer::new(with_admin_auth(router(&backend))).unwrap();
        admin.get("/api/transactions/12").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_my_transactions_only_lists_own_orders() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transactions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [order(1, "2", "PAID", None), order(2, "99", "PAID", None)]
            })))
            .mount(&backend)
            .await;

        let server = TestServer::new(with_warga_auth(router(&backend))).unwrap();
        let body: Value = server.get("/api/transactions/me").await.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["orderId"], "ORDER-1");
    }
}
