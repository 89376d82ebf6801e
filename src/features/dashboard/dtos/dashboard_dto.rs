use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::laporan::models::LaporanStats;
use crate::features::umkm::models::Umkm;
use crate::features::wisata::models::Wisata;
use crate::modules::weather::CurrentWeather;

// ============================================================================
// Home
// ============================================================================

/// Village population figures from the backend's statistics endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopulationStats {
    #[serde(alias = "totalPenduduk")]
    pub total: i64,
    #[serde(default)]
    pub laki_laki: i64,
    #[serde(default)]
    pub perempuan: i64,
    #[serde(default)]
    pub kepala_keluarga: Option<i64>,
}

/// Home page payload. Each part loads independently; a failed part is `null` or empty.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomeDto {
    pub weather: Option<CurrentWeather>,
    pub population: Option<PopulationStats>,
    pub featured_wisata: Vec<Wisata>,
    pub featured_umkm: Vec<Umkm>,
}

// ============================================================================
// Admin dashboard
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityCounts {
    pub users: usize,
    pub laporan: usize,
    pub program: usize,
    pub wisata: usize,
    pub umkm: usize,
    pub transactions: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardDto {
    pub counts: EntityCounts,
    pub laporan: LaporanStats,
    /// Mean progress of all programs, 0 when there are none
    pub average_progress: f64,
    /// Total ticket revenue from paid orders, in rupiah
    pub ticket_revenue: f64,
    pub paid_transactions: usize,
}
