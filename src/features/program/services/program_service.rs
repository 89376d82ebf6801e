use std::sync::Arc;
use validator::Validate;

use crate::core::error::Result;
use crate::features::program::dtos::{CreateProgramDto, UpdateProgramDto};
use crate::features::program::models::Program;
use crate::modules::backend::{BackendClient, CallContext, ResourceClient};
use crate::shared::filter::ListFilterQuery;

const COLLECTION: &str = "program";

pub struct ProgramService {
    backend: Arc<BackendClient>,
}

impl ProgramService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    fn programs(&self) -> ResourceClient<'_, Program> {
        self.backend.resource(COLLECTION)
    }

    pub async fn all(&self, ctx: &CallContext) -> Result<Vec<Program>> {
        Ok(self.programs().get_all(ctx).await?)
    }

    pub async fn list(&self, ctx: &CallContext, filter: &ListFilterQuery) -> Result<Vec<Program>> {
        Ok(filter.apply(self.all(ctx).await?))
    }

    pub async fn get(&self, ctx: &CallContext, id: &str) -> Result<Program> {
        Ok(self.programs().get_by_id(ctx, id).await?)
    }

    pub async fn create(&self, ctx: &CallContext, dto: CreateProgramDto) -> Result<Program> {
        dto.validate()?;
        let program = self.programs().create(ctx, &dto).await?;
        tracing::info!("Created program {} ({})", program.id, program.nama);
        Ok(program)
    }

    pub async fn update(&self, ctx: &CallContext, id: &str, dto: UpdateProgramDto) -> Result<Program> {
        dto.validate()?;
        Ok(self.programs().update(ctx, id, &dto).await?)
    }

    pub async fn delete(&self, ctx: &CallContext, id: &str) -> Result<()> {
        self.programs().delete(ctx, id).await?;
        tracing::info!("Program {} deleted", id);
        Ok(())
    }
}
