use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::transactions::models::{Transaction, TransactionStatus};
use crate::shared::constants::SUCCESS_REDIRECT_SECS;
use crate::shared::countdown::{parse_expiry_time, wib_date, Countdown};
use crate::shared::serde_helpers;
use crate::shared::validation::not_blank;

fn not_in_past(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date < wib_date(Utc::now()) {
        return Err(ValidationError::new("past_date")
            .with_message(Cow::from("Tanggal kunjungan tidak boleh di masa lalu")));
    }
    Ok(())
}

/// Ticket purchase form
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseTicketDto {
    #[serde(deserialize_with = "serde_helpers::id")]
    #[validate(custom(function = "not_blank"))]
    pub wisata_id: String,

    #[validate(range(min = 1, message = "Jumlah tiket minimal 1"))]
    pub jumlah_tiket: i64,

    #[validate(custom(function = "not_in_past"))]
    pub tanggal_kunjungan: NaiveDate,

    /// Virtual account bank, e.g. "bca"; the gateway default is used when omitted
    #[serde(default)]
    pub bank: Option<String>,
}

/// Order body forwarded to the backend, which creates the gateway charge
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendCreateTransaction<'a> {
    pub user_id: &'a str,
    pub wisata_id: &'a str,
    pub jumlah_tiket: i64,
    pub total_harga: f64,
    pub tanggal_kunjungan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<&'a str>,
}

impl<'a> BackendCreateTransaction<'a> {
    pub fn new(dto: &'a PurchaseTicketDto, user_id: &'a str, ticket_price: f64) -> Self {
        Self {
            user_id,
            wisata_id: dto.wisata_id.trim(),
            jumlah_tiket: dto.jumlah_tiket,
            total_harga: ticket_price * dto.jumlah_tiket as f64,
            tanggal_kunjungan: dto.tanggal_kunjungan.format("%Y-%m-%d").to_string(),
            bank: dto.bank.as_deref(),
        }
    }
}

/// What the pending page shows for copying into a banking app
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInstructions {
    pub va_number: Option<String>,
    pub bank: Option<String>,
    pub payment_type: Option<String>,
    pub expiry_time: Option<String>,
}

/// Where the success page sends the visitor
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketRedirect {
    pub ticket_path: String,
    pub ticket_url: String,
    pub seconds: u64,
}

/// Payment status of one order as rendered by the success/pending pages
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusView {
    pub status: TransactionStatus,
    /// Pending only: "HH:MM:SS" until expiry, or "Expired"
    pub countdown: Option<String>,
    pub expired: bool,
    pub payment: Option<PaymentInstructions>,
    pub redirect: Option<TicketRedirect>,
    pub transaction: Transaction,
}

impl PaymentStatusView {
    pub fn new(transaction: Transaction, now: DateTime<Utc>, frontend_url: &str) -> Self {
        let mut view = Self {
            status: transaction.status,
            countdown: None,
            expired: false,
            payment: None,
            redirect: None,
            transaction,
        };

        match view.status {
            TransactionStatus::Pending => {
                let t = &view.transaction;
                if let Some(expiry) = t.expiry_time.as_deref().and_then(parse_expiry_time) {
                    let countdown = Countdown::until(expiry, now);
                    view.expired = countdown.is_expired();
                    view.countdown = Some(countdown.to_string());
                }
                view.payment = Some(PaymentInstructions {
                    va_number: t.va_number.clone(),
                    bank: t.bank.clone(),
                    payment_type: t.payment_type.clone(),
                    expiry_time: t.expiry_time.clone(),
                });
            }
            TransactionStatus::Paid => {
                let ticket_path = view.transaction.ticket_path();
                view.redirect = Some(TicketRedirect {
                    ticket_url: format!("{}{}", frontend_url.trim_end_matches('/'), ticket_path),
                    ticket_path,
                    seconds: SUCCESS_REDIRECT_SECS,
                });
            }
            TransactionStatus::Cancelled => {}
        }

        view
    }
}
