use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: String,
    pub expires_at: DateTime<Utc>,
}

/// In-memory admin sessions keyed by opaque token.
///
/// Cloning shares the same map. Expiry is enforced on every lookup, so a
/// cookie that outlives its session is rejected regardless of its max-age.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn create(&self, user: &str) -> String {
        self.create_at(user, Utc::now()).await
    }

    pub async fn create_at(&self, user: &str, now: DateTime<Utc>) -> String {
        let token = Uuid::new_v4().to_string();
        let ttl = TimeDelta::from_std(self.ttl).unwrap_or(TimeDelta::days(1));
        let mut sessions = self.sessions.write().await;
        // Abandoned sessions are only dropped here or on their next lookup.
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(
            token.clone(),
            Session {
                user: user.to_string(),
                expires_at: now + ttl,
            },
        );
        token
    }

    pub async fn validate(&self, token: &str) -> Option<Session> {
        self.validate_at(token, Utc::now()).await
    }

    /// Returns the live session for `token`, evicting it if it has expired.
    pub async fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Option<Session> {
        let session = self.sessions.read().await.get(token).cloned()?;
        if session.expires_at > now {
            return Some(session);
        }
        self.sessions.write().await.remove(token);
        None
    }

    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}
