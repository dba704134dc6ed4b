use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::features::auth::models::AdminSession;

/// Issues and checks admin session tokens.
///
/// Sessions live in process memory only and are lost on restart.
pub struct AdminSessionService {
    password: String,
    ttl: chrono::Duration,
    sessions: RwLock<HashMap<String, AdminSession>>,
}

impl AdminSessionService {
    pub fn new(password: String, ttl: Duration) -> Self {
        Self {
            password,
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::hours(8)),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start a session if `secret` matches the admin password
    pub async fn login(&self, secret: &str) -> Option<AdminSession> {
        if self.password.is_empty() || secret != self.password {
            warn!("Rejected admin login attempt");
            return None;
        }

        let now = Utc::now();
        let session = AdminSession {
            token: Uuid::now_v7().to_string(),
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        if sessions.len() < before {
            debug!("Pruned {} expired admin sessions", before - sessions.len());
        }
        sessions.insert(session.token.clone(), session.clone());
        drop(sessions);

        info!("Admin session started, expires_at={}", session.expires_at);
        Some(session)
    }

    /// Look up a live session. An expired session is evicted.
    pub async fn session(&self, token: &str) -> Option<AdminSession> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                None => return None,
                Some(s) if !s.is_expired_at(now) => return Some(s.clone()),
                Some(_) => {}
            }
        }

        // re-check under the write lock before evicting
        let mut sessions = self.sessions.write().await;
        if sessions.get(token).is_some_and(|s| s.is_expired_at(now)) {
            sessions.remove(token);
            debug!("Evicted expired admin session");
        }
        None
    }

    pub async fn is_authenticated(&self, token: &str) -> bool {
        self.session(token).await.is_some()
    }

    /// End a session. Returns false if the token was unknown.
    pub async fn logout(&self, token: &str) -> bool {
        let removed = self.sessions.write().await.remove(token).is_some();
        if removed {
            info!("Admin session ended");
        }
        removed
    }
}
