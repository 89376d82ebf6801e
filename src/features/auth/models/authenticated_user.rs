use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::users::models::{User, UserRole};

/// Caller resolved from a live session, inserted into request extensions
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Portal session token the request was authenticated with
    #[serde(skip_serializing)]
    pub session_token: String,
    /// Token forwarded to the village backend on the user's behalf
    #[serde(skip_serializing)]
    pub backend_token: String,
    pub user: User,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn role(&self) -> UserRole {
        self.user.role
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}
