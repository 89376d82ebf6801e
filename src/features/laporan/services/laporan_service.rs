use std::sync::Arc;
use validator::Validate;

use crate::core::error::Result;
use crate::features::auth::models::AuthenticatedUser;
use crate::features::laporan::dtos::{
    BackendCreateLaporan, CreateLaporanDto, UpdateLaporanDto, UpdateLaporanStatusDto,
};
use crate::features::laporan::models::{Laporan, LaporanStats};
use crate::modules::backend::{BackendClient, CallContext, ResourceClient};
use crate::shared::filter::ListFilterQuery;

const COLLECTION: &str = "laporan";

pub struct LaporanService {
    backend: Arc<BackendClient>,
}

impl LaporanService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    fn laporan(&self) -> ResourceClient<'_, Laporan> {
        self.backend.resource(COLLECTION)
    }

    pub async fn all(&self, ctx: &CallContext) -> Result<Vec<Laporan>> {
        Ok(self.laporan().get_all(ctx).await?)
    }

    pub async fn list(&self, ctx: &CallContext, filter: &ListFilterQuery) -> Result<Vec<Laporan>> {
        let items = self.all(ctx).await?;
        Ok(filter.apply(items))
    }

    /// Stat cards; status facet is ignored so every card stays meaningful
    pub async fn stats(&self, ctx: &CallContext, filter: &ListFilterQuery) -> Result<LaporanStats> {
        let scoped = ListFilterQuery {
            status: None,
            ..filter.clone()
        };
        let items = self.list(ctx, &scoped).await?;
        Ok(LaporanStats::from_items(&items))
    }

    /// Laporan submitted by the logged-in resident
    pub async fn mine(&self, ctx: &CallContext, user: &AuthenticatedUser) -> Result<Vec<Laporan>> {
        let items = self.all(ctx).await?;
        Ok(items
            .into_iter()
            .filter(|l| l.reported_by(user.user_id()))
            .collect())
    }

    pub async fn get(&self, ctx: &CallContext, id: &str) -> Result<Laporan> {
        Ok(self.laporan().get_by_id(ctx, id).await?)
    }

    pub async fn create(
        &self,
        ctx: &CallContext,
        reporter: Option<&AuthenticatedUser>,
        dto: CreateLaporanDto,
    ) -> Result<Laporan> {
        dto.validate()?;

        let body = BackendCreateLaporan::new(&dto, reporter.map(|u| u.user_id()));
        let laporan = self.laporan().create(ctx, &body).await?;

        match reporter {
            Some(user) => tracing::info!("Laporan {} submitted by user {}", laporan.id, user.user_id()),
            None => tracing::info!("Laporan {} submitted by guest", laporan.id),
        }

        Ok(laporan)
    }

    pub async fn update(&self, ctx: &CallContext, id: &str, dto: UpdateLaporanDto) -> Result<Laporan> {
        dto.validate()?;
        Ok(self.laporan().update(ctx, id, &dto).await?)
    }

    pub async fn update_status(
        &self,
        ctx: &CallContext,
        id: &str,
        dto: UpdateLaporanStatusDto,
    ) -> Result<Laporan> {
        dto.validate()?;
        let path = format!("/{}/{}/status", COLLECTION, urlencoding::encode(id));
        let laporan: Laporan = self.backend.patch(ctx, &path, &dto).await?;
        tracing::info!("Laporan {} status set to {}", id, laporan.status);
        Ok(laporan)
    }

    pub async fn delete(&self, ctx: &CallContext, id: &str) -> Result<()> {
        self.laporan().delete(ctx, id).await?;
        tracing::info!("Laporan {} deleted", id);
        Ok(())
    }
}
