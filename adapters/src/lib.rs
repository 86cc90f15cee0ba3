//! Core `adapters` crate for abstracting the session store behind authentication.
//!
//! This crate defines the `SessionStore` trait, which outlines the operations the
//! backend needs from whatever keeps authenticated sessions alive, and provides
//! the concrete implementations (in-memory, Redis).

pub mod errors;
pub mod memory;
pub mod models;
pub mod redis_store;

use async_trait::async_trait;
use chrono::Duration;

pub use errors::AdapterError;
pub use memory::MemorySessionStore;
pub use models::{Session, SessionUser};
pub use redis_store::RedisSessionStore;

/// Storage for authenticated sessions, keyed by their opaque token.
///
/// Implementations own the session lifecycle: tokens are minted here, and an
/// expired session must never be returned from [`SessionStore::get`].
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Mints a new token for `user`, valid for `ttl` from now.
    async fn create(&self, user: SessionUser, ttl: Duration) -> Result<Session, AdapterError>;

    /// Looks a session up by token. Expired sessions resolve to `None`.
    async fn get(&self, token: &str) -> Result<Option<Session>, AdapterError>;

    /// Removes a session. Revoking an unknown token is not an error.
    async fn revoke(&self, token: &str) -> Result<(), AdapterError>;

    /// Drops every expired session, returning how many were removed.
    async fn purge_expired(&self) -> Result<usize, AdapterError>;
}
