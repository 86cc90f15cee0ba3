//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the server port, the auth callback base URL, session lifetimes and the
//! staleness window handed to every request's query client.

use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use axum::http::HeaderValue;
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_QUERY_STALE_TIME_MS: u64 = 60_000;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;
pub const DEFAULT_SESSION_SWEEP_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_SIGN_IN_PATH: &str = "/auth/signin";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL the auth provider calls back into (`NEXTAUTH_URL`).
    pub auth_url: Option<String>,
    /// Deployment environment name (`NODE_ENV`).
    pub environment: Option<String>,
    pub query_stale_time: Duration,
    pub session_ttl: Duration,
    pub session_sweep_interval: Duration,
    pub sign_in_path: String,
    pub redis_url: Option<String>,
    pub seed_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            auth_url: None,
            environment: None,
            query_stale_time: Duration::from_millis(DEFAULT_QUERY_STALE_TIME_MS),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            session_sweep_interval: Duration::from_secs(DEFAULT_SESSION_SWEEP_INTERVAL_SECS),
            sign_in_path: DEFAULT_SIGN_IN_PATH.to_string(),
            redis_url: None,
            seed_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", DEFAULT_PORT),
            auth_url: optional("NEXTAUTH_URL"),
            environment: optional("NODE_ENV"),
            query_stale_time: Duration::from_millis(try_load(
                "QUERY_STALE_TIME_MS",
                DEFAULT_QUERY_STALE_TIME_MS,
            )),
            session_ttl: Duration::from_secs(try_load(
                "SESSION_TTL_SECS",
                DEFAULT_SESSION_TTL_SECS,
            )),
            session_sweep_interval: Duration::from_secs(nonzero_or(
                "SESSION_SWEEP_INTERVAL_SECS",
                try_load(
                    "SESSION_SWEEP_INTERVAL_SECS",
                    DEFAULT_SESSION_SWEEP_INTERVAL_SECS,
                ),
                DEFAULT_SESSION_SWEEP_INTERVAL_SECS,
            )),
            sign_in_path: sign_in_path_or_default(optional("SIGN_IN_PATH")),
            redis_url: optional("REDIS_URL"),
            seed_path: optional("SEED_PATH").map(PathBuf::from),
        }
    }

    /// True iff the auth callback base URL is a non-empty string.
    pub fn has_auth_url(&self) -> bool {
        self.auth_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

fn nonzero_or(key: &str, value: u64, default: u64) -> u64 {
    if value == 0 {
        warn!("{key} must be greater than zero, using default: {default}");
        return default;
    }

    value
}

/// The sign-in path ends up in a `Location` header, so it must be a valid
/// header value.
fn sign_in_path_or_default(raw: Option<String>) -> String {
    match raw {
        Some(path) if HeaderValue::from_str(&path).is_ok() && !path.is_empty() => path,
        Some(path) => {
            warn!("Invalid SIGN_IN_PATH value {path:?}, using default: {DEFAULT_SIGN_IN_PATH}");
            DEFAULT_SIGN_IN_PATH.to_string()
        }
        None => DEFAULT_SIGN_IN_PATH.to_string(),
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    parse_or(key, &raw, default)
}

fn parse_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
