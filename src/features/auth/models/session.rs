use chrono::{DateTime, Utc};

use crate::features::users::models::User;

/// Logged-in session held by the portal
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub backend_token: String,
    pub user: User,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
