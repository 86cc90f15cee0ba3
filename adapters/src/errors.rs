//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur while talking to a session store,
//! providing a unified error type for every store implementation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("session store unavailable: {0}")]
    Backend(String),

    #[error("malformed session record: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<redis::RedisError> for AdapterError {
    fn from(err: redis::RedisError) -> Self {
        AdapterError::Backend(err.to_string())
    }
}
