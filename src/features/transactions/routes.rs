use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::transactions::handlers;
use crate::features::transactions::services::TransactionService;

pub fn routes(service: Arc<TransactionService>) -> Router {
    Router::new()
        .route(
            "/api/transactions",
            get(handlers::list_transactions).post(handlers::purchase_ticket),
        )
        .route("/api/transactions/me", get(handlers::my_transactions))
        .route(
            "/api/transactions/order/{order_id}",
            get(handlers::payment_status),
        )
        .route(
            "/api/transactions/order/{order_id}/countdown",
            get(handlers::payment_countdown),
        )
        .route("/api/transactions/{id}", get(handlers::get_transaction))
        .with_state(service)
}
