use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::umkm::dtos::{CreateUmkmDto, UpdateUmkmDto};
use crate::features::umkm::models::Umkm;
use crate::modules::backend::{BackendClient, CallContext, ResourceClient};
use crate::shared::filter::ListFilterQuery;
use crate::shared::types::{paginate, PaginationMeta, PaginationQuery};

const COLLECTION: &str = "umkm";

pub struct UmkmService {
    backend: Arc<BackendClient>,
}

impl UmkmService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    fn umkm(&self) -> ResourceClient<'_, Umkm> {
        self.backend.resource(COLLECTION)
    }

    pub async fn all(&self, ctx: &CallContext) -> Result<Vec<Umkm>> {
        Ok(self.umkm().get_all(ctx).await?)
    }

    /// One page of the directory after filtering
    pub async fn list_page(
        &self,
        ctx: &CallContext,
        filter: &ListFilterQuery,
        page: &PaginationQuery,
        include_inactive: bool,
    ) -> Result<(Vec<Umkm>, PaginationMeta)> {
        let items: Vec<Umkm> = self
            .all(ctx)
            .await?
            .into_iter()
            .filter(|u| include_inactive || u.is_aktif)
            .collect();

        Ok(paginate(filter.apply(items), page))
    }

    /// Active businesses for the home page
    pub async fn featured(&self, ctx: &CallContext, limit: usize) -> Result<Vec<Umkm>> {
        let items = self.all(ctx).await?;
        Ok(items.into_iter().filter(|u| u.is_aktif).take(limit).collect())
    }

    pub async fn get(&self, ctx: &CallContext, id: &str) -> Result<Umkm> {
        Ok(self.umkm().get_by_id(ctx, id).await?)
    }

    pub async fn get_by_slug(&self, ctx: &CallContext, slug: &str, include_inactive: bool) -> Result<Umkm> {
        let path = format!("/{}/slug/{}", COLLECTION, urlencoding::encode(slug));
        let umkm: Umkm = self.backend.get(ctx, &path).await?;
        if !umkm.is_aktif && !include_inactive {
            return Err(AppError::NotFound("UMKM tidak ditemukan".to_string()));
        }
        Ok(umkm)
    }

    pub async fn create(&self, ctx: &CallContext, dto: CreateUmkmDto) -> Result<Umkm> {
        let dto = dto.with_slug();
        dto.validate()?;
        let umkm = self.umkm().create(ctx, &dto).await?;
        tracing::info!("Created UMKM {} ({})", umkm.id, umkm.slug);
        Ok(umkm)
    }

    pub async fn update(&self, ctx: &CallContext, id: &str, dto: UpdateUmkmDto) -> Result<Umkm> {
        dto.validate()?;
        Ok(self.umkm().update(ctx, id, &dto).await?)
    }

    pub async fn delete(&self, ctx: &CallContext, id: &str) -> Result<()> {
        self.umkm().delete(ctx, id).await?;
        tracing::info!("UMKM {} deleted", id);
        Ok(())
    }
}
