use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    BackendAuthPayload, BackendRegisterBody, LoginRequestDto, RegisterRequestDto,
    RegisterResponseDto, SessionDto,
};
use crate::features::auth::models::{AuthenticatedUser, Session};
use crate::features::auth::outcome::AuthOutcome;
use crate::features::auth::services::SessionStore;
use crate::features::users::models::User;
use crate::modules::backend::{BackendClient, CallContext};

pub struct AuthService {
    backend: Arc<BackendClient>,
    sessions: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(backend: Arc<BackendClient>, sessions: Arc<SessionStore>) -> Self {
        Self { backend, sessions }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub async fn login(&self, ctx: &CallContext, dto: LoginRequestDto) -> AuthOutcome<SessionDto> {
        self.try_login(ctx, dto).await.into()
    }

    pub async fn register(
        &self,
        ctx: &CallContext,
        dto: RegisterRequestDto,
    ) -> AuthOutcome<RegisterResponseDto> {
        self.try_register(ctx, dto).await.into()
    }

    pub async fn logout(&self, user: &AuthenticatedUser) -> AuthOutcome<()> {
        if self.sessions.remove(&user.session_token).await {
            tracing::info!("User {} logged out", user.user_id());
            AuthOutcome::Success(())
        } else {
            AuthOutcome::failure(AppError::Unauthorized(
                "Sesi tidak ditemukan".to_string(),
            ))
        }
    }

    /// Refresh the session user from the backend profile
    pub async fn current_user(&self, ctx: &CallContext, user: &AuthenticatedUser) -> Result<User> {
        match self.backend.get::<User>(ctx, "/auth/me").await {
            Ok(profile) => Ok(profile),
            Err(e) => {
                tracing::warn!(
                    "Profile refresh for user {} failed, using session copy: {}",
                    user.user_id(),
                    e
                );
                Ok(user.user.clone())
            }
        }
    }

    async fn try_login(&self, ctx: &CallContext, dto: LoginRequestDto) -> Result<SessionDto> {
        dto.validate()?;

        let payload: BackendAuthPayload = self
            .backend
            .post(ctx, "/auth/login", &dto)
            .await
            .map_err(|e| {
                tracing::warn!("Login failed for {}: {}", dto.email, e);
                AppError::from(e)
            })?;

        let token = payload.token.ok_or_else(|| {
            AppError::ExternalServiceError("Backend login returned no token".to_string())
        })?;

        let session = self.sessions.create(token, payload.user).await;
        tracing::info!("User {} logged in", session.user.id);

        Ok(session_dto(session))
    }

    async fn try_register(
        &self,
        ctx: &CallContext,
        dto: RegisterRequestDto,
    ) -> Result<RegisterResponseDto> {
        dto.validate()?;

        let payload: BackendAuthPayload = self
            .backend
            .post(ctx, "/auth/register", &BackendRegisterBody::from(&dto))
            .await?;

        tracing::info!("Registered user {}", payload.user.id);

        let session = match payload.token {
            Some(token) => Some(session_dto(
                self.sessions.create(token, payload.user.clone()).await,
            )),
            None => None,
        };

        Ok(RegisterResponseDto {
            user: payload.user,
            session,
        })
    }
}

fn session_dto(session: Session) -> SessionDto {
    SessionDto {
        token: session.token,
        expires_at: session.expires_at,
        user: session.user,
    }
}
