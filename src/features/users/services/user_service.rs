use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::models::AuthenticatedUser;
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto};
use crate::features::users::models::User;
use crate::modules::backend::{BackendClient, CallContext, ResourceClient};
use crate::shared::filter::ListFilterQuery;

const COLLECTION: &str = "users";

/// Admin user management backed by the village backend
pub struct UserService {
    backend: Arc<BackendClient>,
}

impl UserService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    fn users(&self) -> ResourceClient<'_, User> {
        self.backend.resource(COLLECTION)
    }

    pub async fn list(&self, ctx: &CallContext, filter: &ListFilterQuery) -> Result<Vec<User>> {
        let users = self.users().get_all(ctx).await?;
        Ok(filter.apply(users))
    }

    pub async fn get(&self, ctx: &CallContext, id: &str) -> Result<User> {
        Ok(self.users().get_by_id(ctx, id).await?)
    }

    pub async fn create(&self, ctx: &CallContext, dto: CreateUserDto) -> Result<User> {
        dto.validate()?;
        let user = self.users().create(ctx, &dto).await?;
        tracing::info!("Created user {} with role {}", user.id, user.role);
        Ok(user)
    }

    pub async fn update(&self, ctx: &CallContext, id: &str, dto: UpdateUserDto) -> Result<User> {
        let dto = dto.normalized();
        dto.validate()?;
        Ok(self.users().update(ctx, id, &dto).await?)
    }

    pub async fn delete(
        &self,
        ctx: &CallContext,
        actor: &AuthenticatedUser,
        id: &str,
    ) -> Result<()> {
        if actor.user_id() == id {
            return Err(AppError::BadRequest(
                "Tidak dapat menghapus akun sendiri".to_string(),
            ));
        }
        self.users().delete(ctx, id).await?;
        tracing::info!("User {} deleted by {}", id, actor.user_id());
        Ok(())
    }
}
