use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::wisata::dtos::{CreateWisataDto, ResolveCoordinatesDto, UpdateWisataDto};
use crate::features::wisata::models::Wisata;
use crate::modules::backend::{BackendClient, CallContext, ResourceClient};
use crate::modules::maps::{CoordinateResolver, Coordinates};
use crate::shared::filter::ListFilterQuery;

const COLLECTION: &str = "wisata";

pub struct WisataService {
    backend: Arc<BackendClient>,
    resolver: Arc<CoordinateResolver>,
}

impl WisataService {
    pub fn new(backend: Arc<BackendClient>, resolver: Arc<CoordinateResolver>) -> Self {
        Self { backend, resolver }
    }

    fn wisata(&self) -> ResourceClient<'_, Wisata> {
        self.backend.resource(COLLECTION)
    }

    pub async fn all(&self, ctx: &CallContext) -> Result<Vec<Wisata>> {
        Ok(self.wisata().get_all(ctx).await?)
    }

    /// Filtered listing; inactive destinations are only visible to admins
    pub async fn list(
        &self,
        ctx: &CallContext,
        filter: &ListFilterQuery,
        include_inactive: bool,
    ) -> Result<Vec<Wisata>> {
        let items = self
            .all(ctx)
            .await?
            .into_iter()
            .filter(|w| include_inactive || w.is_aktif)
            .collect();
        Ok(filter.apply(items))
    }

    /// Active destinations for the home page
    pub async fn featured(&self, ctx: &CallContext, limit: usize) -> Result<Vec<Wisata>> {
        let items = self.all(ctx).await?;
        Ok(items.into_iter().filter(|w| w.is_aktif).take(limit).collect())
    }

    pub async fn get(&self, ctx: &CallContext, id: &str, include_inactive: bool) -> Result<Wisata> {
        let wisata = self.wisata().get_by_id(ctx, id).await?;
        if !wisata.is_aktif && !include_inactive {
            return Err(AppError::NotFound("Wisata tidak ditemukan".to_string()));
        }
        Ok(wisata)
    }

    pub async fn create(&self, ctx: &CallContext, dto: CreateWisataDto) -> Result<Wisata> {
        dto.validate()?;
        let wisata = self.wisata().create(ctx, &dto).await?;
        tracing::info!("Created wisata {} ({})", wisata.id, wisata.nama);
        Ok(wisata)
    }

    pub async fn update(&self, ctx: &CallContext, id: &str, dto: UpdateWisataDto) -> Result<Wisata> {
        dto.validate()?;
        Ok(self.wisata().update(ctx, id, &dto).await?)
    }

    pub async fn delete(&self, ctx: &CallContext, id: &str) -> Result<()> {
        self.wisata().delete(ctx, id).await?;
        tracing::info!("Wisata {} deleted", id);
        Ok(())
    }

    /// Extract coordinates from a pasted Google Maps link
    pub async fn resolve_coordinates(&self, dto: ResolveCoordinatesDto) -> Result<Coordinates> {
        dto.validate()?;
        let coordinates = self.resolver.resolve(&dto.url).await?;
        tracing::debug!(
            "Resolved maps link to {},{}",
            coordinates.latitude,
            coordinates.longitude
        );
        Ok(coordinates)
    }
}
