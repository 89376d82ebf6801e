use std::sync::Arc;

use crate::core::error::Result;
use crate::features::dashboard::dtos::*;
use crate::features::laporan::models::{Laporan, LaporanStats};
use crate::features::program::models::{average_progress, Program};
use crate::features::transactions::models::{paid_revenue, Transaction, TransactionStatus};
use crate::features::umkm::models::Umkm;
use crate::features::users::models::User;
use crate::features::wisata::models::Wisata;
use crate::modules::backend::{BackendClient, CallContext};
use crate::modules::weather::WeatherProvider;
use crate::shared::constants::HOME_FEATURED_LIMIT;

const POPULATION_PATH: &str = "/stats/penduduk";

/// Aggregated views for the public home page and the admin dashboard
pub struct DashboardService {
    backend: Arc<BackendClient>,
    weather: Arc<dyn WeatherProvider>,
}

impl DashboardService {
    pub fn new(backend: Arc<BackendClient>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self { backend, weather }
    }

    // ========================================================================
    // Home
    // ========================================================================

    async fn featured_wisata(&self, ctx: &CallContext) -> Result<Vec<Wisata>> {
        let items: Vec<Wisata> = self.backend.resource("wisata").get_all(ctx).await?;
        Ok(items
            .into_iter()
            .filter(|w| w.is_aktif)
            .take(HOME_FEATURED_LIMIT)
            .collect())
    }

    async fn featured_umkm(&self, ctx: &CallContext) -> Result<Vec<Umkm>> {
        let items: Vec<Umkm> = self.backend.resource("umkm").get_all(ctx).await?;
        Ok(items
            .into_iter()
            .filter(|u| u.is_aktif)
            .take(HOME_FEATURED_LIMIT)
            .collect())
    }

    /// Home page data.
    ///
    /// All parts are fetched concurrently and never fail the request; a part
    /// that errors is logged and left empty.
    pub async fn home(&self, ctx: &CallContext) -> HomeDto {
        let (weather, population, wisata, umkm) = tokio::join!(
            self.weather.current(),
            self.backend.get::<PopulationStats>(ctx, POPULATION_PATH),
            self.featured_wisata(ctx),
            self.featured_umkm(ctx),
        );

        HomeDto {
            weather: weather
                .map_err(|e| tracing::warn!("Home: weather unavailable: {}", e))
                .ok(),
            population: population
                .map_err(|e| tracing::warn!("Home: population stats unavailable: {}", e))
                .ok(),
            featured_wisata: wisata
                .map_err(|e| tracing::warn!("Home: featured wisata unavailable: {}", e))
                .unwrap_or_default(),
            featured_umkm: umkm
                .map_err(|e| tracing::warn!("Home: featured UMKM unavailable: {}", e))
                .unwrap_or_default(),
        }
    }

    // ========================================================================
    // Admin
    // ========================================================================

    pub async fn admin_summary(&self, ctx: &CallContext) -> Result<AdminDashboardDto> {
        let backend = &self.backend;
        let users_res = backend.resource::<User>("users");
        let laporan_res = backend.resource::<Laporan>("laporan");
        let program_res = backend.resource::<Program>("program");
        let wisata_res = backend.resource::<Wisata>("wisata");
        let umkm_res = backend.resource::<Umkm>("umkm");
        let transactions_res = backend.resource::<Transaction>("transactions");
        let (users, laporan, program, wisata, umkm, transactions) = tokio::try_join!(
            users_res.get_all(ctx),
            laporan_res.get_all(ctx),
            program_res.get_all(ctx),
            wisata_res.get_all(ctx),
            umkm_res.get_all(ctx),
            transactions_res.get_all(ctx),
        )?;

        Ok(AdminDashboardDto {
            counts: EntityCounts {
                users: users.len(),
                laporan: laporan.len(),
                program: program.len(),
                wisata: wisata.len(),
                umkm: umkm.len(),
                transactions: transactions.len(),
            },
            laporan: LaporanStats::from_items(&laporan),
            average_progress: average_progress(&program),
            ticket_revenue: paid_revenue(&transactions),
            paid_transactions: transactions
                .iter()
                .filter(|t| t.status == TransactionStatus::Paid)
                .count(),
        })
    }
}
