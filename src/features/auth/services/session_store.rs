use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::features::auth::models::Session;
use crate::features::users::models::User;

/// In-memory login sessions keyed by an opaque portal token
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::days(1)),
        }
    }

    /// Start a session for a user the backend has authenticated
    pub async fn create(&self, backend_token: String, user: User) -> Session {
        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            backend_token,
            user,
            created_at: now,
            expires_at: now + self.ttl,
        };

        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());

        tracing::debug!(
            "Session started for user {} (expires {})",
            session.user.id,
            session.expires_at
        );

        session
    }

    /// Look up a live session; expired sessions are treated as absent
    pub async fn get(&self, token: &str) -> Option<Session> {
        self.get_at(token, Utc::now()).await
    }

    async fn get_at(&self, token: &str, now: DateTime<Utc>) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions
            .get(token)
            .filter(|s| !s.is_expired_at(now))
            .cloned()
    }

    /// End a session. Returns false when the token was unknown.
    pub async fn remove(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Drop every expired session, returning how many were removed
    pub async fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Utc::now()).await
    }

    async fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        before - sessions.len()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::UserRole;

    fn warga() -> User {
        User {
            id: "7".to_string(),
            email: "sari@desa.id".to_string(),
            name: "Sari".to_string(),
            role: UserRole::Warga,
            no_telp: None,
            alamat: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new(Duration::from_secs(3600));
        let session = store.create("backend-jwt".to_string(), warga()).await;

        let found = store.get(&session.token).await.unwrap();
        assert_eq!(found.backend_token, "backend-jwt");
        assert_eq!(found.user.id, "7");
        assert!(store.get("unknown").await.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_invisible_and_swept() {
        let store = SessionStore::new(Duration::from_secs(60));
        let session = store.create("t".to_string(), warga()).await;
        let later = session.expires_at + chrono::Duration::seconds(1);

        assert!(store.get_at(&session.token, later).await.is_none());
        assert_eq!(store.sweep_expired_at(later).await, 1);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SessionStore::new(Duration::from_secs(60));
        let session = store.create("t".to_string(), warga()).await;

        assert!(store.remove(&session.token).await);
        assert!(!store.remove(&session.token).await);
        assert!(store.get(&session.token).await.is_none());
    }
}
