//! In-process session store.
//!
//! Suitable for a single server instance; sessions do not survive a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::debug;
use tokio::sync::RwLock;

use crate::{
    errors::AdapterError,
    models::{generate_token, Session, SessionUser},
    SessionStore,
};

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a session as-is. Lets callers plant sessions with a chosen expiry.
    pub async fn insert(&self, session: Session) {
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user: SessionUser, ttl: Duration) -> Result<Session, AdapterError> {
        let session = Session::new(generate_token(), user, Utc::now() + ttl);
        self.insert(session.clone()).await;

        debug!("created session for user {}", session.user.id);
        Ok(session)
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, AdapterError> {
        let sessions = self.sessions.read().await;

        Ok(sessions
            .get(token)
            .filter(|session| !session.is_expired())
            .cloned())
    }

    async fn revoke(&self, token: &str) -> Result<(), AdapterError> {
        if let Some(session) = self.sessions.write().await.remove(token) {
            debug!("revoked session for user {}", session.user.id);
        }

        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize, AdapterError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));

        Ok(before - sessions.len())
    }
}
