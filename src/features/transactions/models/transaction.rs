use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::features::wisata::models::Wisata;
use crate::shared::filter::{Facet, Filterable};
use crate::shared::serde_helpers;

/// Payment state as reported by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Paid,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Paid => "PAID",
            TransactionStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket order for a wisata visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: String,
    pub order_id: String,
    #[serde(deserialize_with = "serde_helpers::id")]
    pub user_id: String,
    #[serde(deserialize_with = "serde_helpers::id")]
    pub wisata_id: String,
    pub jumlah_tiket: i64,
    #[serde(deserialize_with = "serde_helpers::number")]
    pub total_harga: f64,
    pub tanggal_kunjungan: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub va_number: Option<String>,
    #[serde(default)]
    pub bank: Option<String>,
    #[serde(default)]
    pub payment_type: Option<String>,
    /// RFC 3339, or "YYYY-MM-DD HH:MM:SS" in WIB
    #[serde(default)]
    pub expiry_time: Option<String>,
    #[serde(default)]
    pub wisata: Option<Wisata>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Transaction {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Frontend path of the printable ticket
    pub fn ticket_path(&self) -> String {
        format!("/tiket/{}", self.id)
    }
}

impl Filterable for Transaction {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.order_id.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            Facet::Kategori | Facet::Role => None,
        }
    }
}

/// Sum of ticket revenue from paid orders
pub fn paid_revenue(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.status == TransactionStatus::Paid)
        .map(|t| t.total_harga)
        .sum()
}
