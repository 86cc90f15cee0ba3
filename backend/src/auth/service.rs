//! Core business logic for the authentication system.
//!
//! The service validates session tokens against the configured
//! [`SessionStore`], establishes new sessions and signs callers out. A store
//! failure during validation is reported separately from a missing session so
//! callers never sign someone out because the store was unreachable.

use std::{sync::Arc, time::Duration};

use larder_adapters::{Session, SessionStore, SessionUser};
use tracing::{debug, warn};

use super::errors::AuthError;

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn SessionStore>,
    session_ttl: chrono::Duration,
}

impl AuthService {
    pub fn new(store: Arc<dyn SessionStore>, session_ttl: Duration) -> Self {
        let session_ttl =
            chrono::Duration::from_std(session_ttl).unwrap_or_else(|_| chrono::Duration::days(30));

        Self { store, session_ttl }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Starts a session for `user`, valid for the configured TTL.
    pub async fn establish(&self, user: SessionUser) -> Result<Session, AuthError> {
        Ok(self.store.create(user, self.session_ttl).await?)
    }

    /// Resolves a token to a live session.
    ///
    /// `Ok(None)` means the token is unknown or expired; `Err` means the store
    /// could not answer.
    pub async fn validate(&self, token: &str) -> Result<Option<Session>, AuthError> {
        match self.store.get(token).await? {
            Some(session) if !session.is_expired() => Ok(Some(session)),
            _ => {
                debug!("session token did not resolve to a live session");
                Ok(None)
            }
        }
    }

    pub async fn sign_out(&self, token: &str) {
        if let Err(e) = self.store.revoke(token).await {
            warn!("failed to revoke session: {e}");
        }
    }
}
