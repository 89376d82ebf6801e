use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::models::AuthenticatedUser;
use crate::features::transactions::dtos::{
    BackendCreateTransaction, PaymentStatusView, PurchaseTicketDto,
};
use crate::features::transactions::models::{Transaction, TransactionStatus};
use crate::features::wisata::models::Wisata;
use crate::modules::backend::{BackendClient, CallContext, ResourceClient};
use crate::shared::constants::SUCCESS_REDIRECT_SECS;
use crate::shared::countdown::{
    parse_expiry_time, run_expiry_countdown, run_redirect_countdown, Countdown, RedirectTick,
};
use crate::shared::filter::ListFilterQuery;

const COLLECTION: &str = "transactions";

/// Live countdown for one order, fed by a spawned ticker task
pub enum CountdownFeed {
    /// Pending payment: ticks until the virtual account expires
    Expiry(ReceiverStream<Countdown>),
    /// Paid: ticks down to the redirect to the ticket page
    Redirect {
        ticks: ReceiverStream<RedirectTick>,
        ticket_path: String,
    },
    /// Nothing to count down
    Settled(TransactionStatus),
}

pub struct TransactionService {
    backend: Arc<BackendClient>,
    frontend_url: String,
}

impl TransactionService {
    pub fn new(backend: Arc<BackendClient>, frontend_url: String) -> Self {
        Self {
            backend,
            frontend_url,
        }
    }

    fn transactions(&self) -> ResourceClient<'_, Transaction> {
        self.backend.resource(COLLECTION)
    }

    /// Create a ticket order; the backend opens the payment with the gateway
    pub async fn purchase(
        &self,
        ctx: &CallContext,
        user: &AuthenticatedUser,
        dto: PurchaseTicketDto,
    ) -> Result<Transaction> {
        dto.validate()?;

        let wisata: Wisata = self
            .backend
            .resource("wisata")
            .get_by_id(ctx, dto.wisata_id.trim())
            .await?;
        if !wisata.is_aktif {
            return Err(AppError::Validation(
                "Wisata sedang tidak menerima pengunjung".to_string(),
            ));
        }

        let body = BackendCreateTransaction::new(&dto, user.user_id(), wisata.harga);
        let transaction = self.transactions().create(ctx, &body).await?;

        tracing::info!(
            "Ticket order {} created for user {} ({} x {})",
            transaction.order_id,
            user.user_id(),
            transaction.jumlah_tiket,
            wisata.nama
        );

        Ok(transaction)
    }

    pub async fn list(&self, ctx: &CallContext, filter: &ListFilterQuery) -> Result<Vec<Transaction>> {
        let items = self.transactions().get_all(ctx).await?;
        Ok(filter.apply(items))
    }

    pub async fn mine(&self, ctx: &CallContext, user: &AuthenticatedUser) -> Result<Vec<Transaction>> {
        let items = self.transactions().get_all(ctx).await?;
        Ok(items
            .into_iter()
            .filter(|t| t.is_owned_by(user.user_id()))
            .collect())
    }

    /// A ticket, visible to its buyer and to admins
    pub async fn get_for(
        &self,
        ctx: &CallContext,
        user: &AuthenticatedUser,
        id: &str,
    ) -> Result<Transaction> {
        let transaction = self.transactions().get_by_id(ctx, id).await?;
        if !user.is_admin() && !transaction.is_owned_by(user.user_id()) {
            return Err(AppError::NotFound("Transaksi tidak ditemukan".to_string()));
        }
        Ok(transaction)
    }

    pub async fn get_by_order_id(&self, ctx: &CallContext, order_id: &str) -> Result<Transaction> {
        let path = format!("/{}/order/{}", COLLECTION, urlencoding::encode(order_id));
        Ok(self.backend.get(ctx, &path).await?)
    }

    pub async fn payment_status(&self, ctx: &CallContext, order_id: &str) -> Result<PaymentStatusView> {
        let transaction = self.get_by_order_id(ctx, order_id).await?;
        Ok(PaymentStatusView::new(
            transaction,
            Utc::now(),
            &self.frontend_url,
        ))
    }

    /// Start the per-second countdown for an order.
    ///
    /// The ticker stops when `cancel` fires or the returned stream is dropped.
    /// Reaching expiry ends the feed without touching the order.
    pub fn countdown(&self, transaction: &Transaction, cancel: CancellationToken) -> CountdownFeed {
        match transaction.status {
            TransactionStatus::Pending => {
                let Some(expiry) = transaction.expiry_time.as_deref().and_then(parse_expiry_time)
                else {
                    return CountdownFeed::Settled(TransactionStatus::Pending);
                };
                let remaining = (expiry - Utc::now()).to_std().unwrap_or(Duration::ZERO);

                let (tx, rx) = mpsc::channel(4);
                tokio::spawn(run_expiry_countdown(remaining, tx, cancel));
                CountdownFeed::Expiry(ReceiverStream::new(rx))
            }
            TransactionStatus::Paid => {
                let (tx, rx) = mpsc::channel(4);
                tokio::spawn(run_redirect_countdown(SUCCESS_REDIRECT_SECS, tx, cancel));
                CountdownFeed::Redirect {
                    ticks: ReceiverStream::new(rx),
                    ticket_path: transaction.ticket_path(),
                }
            }
            status => CountdownFeed::Settled(status),
        }
    }
}
