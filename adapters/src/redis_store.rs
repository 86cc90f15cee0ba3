//! Redis-backed session store.
//!
//! Sessions are stored as JSON strings under `larder:session:<token>` with a Redis TTL
//! matching their expiry, so Redis evicts them on its own.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::{debug, info};
use redis::{aio::ConnectionManager, AsyncCommands, Client};

use crate::{
    errors::AdapterError,
    models::{generate_token, Session, SessionUser},
    SessionStore,
};

pub const KEY_PREFIX: &str = "larder:session:";

#[derive(Clone)]
pub struct RedisSessionStore {
    connection: ConnectionManager,
}

impl RedisSessionStore {
    pub async fn connect(redis_url: &str) -> Result<Self, AdapterError> {
        let client = Client::open(redis_url)?;
        let connection = client.get_connection_manager().await?;

        info!("connected to redis session store");
        Ok(Self { connection })
    }

    fn key(&self, token: &str) -> String {
        format!("{KEY_PREFIX}{token}")
    }
}

/// Rebuilds a stored session. The token is the key, not part of the payload.
fn decode_session(token: &str, payload: &str) -> Result<Option<Session>, AdapterError> {
    let mut session: Session = serde_json::from_str(payload)?;
    session.token = token.to_string();

    Ok((!session.is_expired()).then_some(session))
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, user: SessionUser, ttl: Duration) -> Result<Session, AdapterError> {
        let session = Session::new(generate_token(), user, Utc::now() + ttl);
        let payload = serde_json::to_string(&session)?;
        let seconds = ttl.num_seconds().max(1) as u64;

        let mut connection = self.connection.clone();
        let _: () = connection
            .set_ex(self.key(&session.token), payload, seconds)
            .await?;

        debug!("created session for user {}", session.user.id);
        Ok(session)
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, AdapterError> {
        let mut connection = self.connection.clone();
        let payload: Option<String> = connection.get(self.key(token)).await?;

        match payload {
            Some(payload) => decode_session(token, &payload),
            None => Ok(None),
        }
    }

    async fn revoke(&self, token: &str) -> Result<(), AdapterError> {
        let mut connection = self.connection.clone();
        let _: () = connection.del(self.key(token)).await?;

        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize, AdapterError> {
        // Redis expires keys itself.
        Ok(0)
    }
}
