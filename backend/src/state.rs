//! Shared application state handed to every handler.

use std::sync::Arc;

use axum::extract::FromRef;
use larder_adapters::{MemorySessionStore, RedisSessionStore, SessionStore};
use tracing::info;

use crate::{
    auth::{AuthError, AuthService},
    config::Config,
    database::Database,
    errors::AppError,
    query::QueryDefaults,
};

pub struct AppState {
    pub config: Config,
    pub auth: AuthService,
    pub database: Database,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Arc<Self>, AppError> {
        let store: Arc<dyn SessionStore> = match &config.redis_url {
            Some(url) => {
                info!("Using redis session store");
                Arc::new(RedisSessionStore::connect(url).await.map_err(AuthError::from)?)
            }
            None => {
                info!("REDIS_URL not set, using in-memory session store");
                Arc::new(MemorySessionStore::new())
            }
        };

        let database = match &config.seed_path {
            Some(path) => Database::load(path).map_err(|e| AppError::Internal(e.to_string()))?,
            None => Database::empty(),
        };

        Ok(Self::with_parts(config, store, database))
    }

    pub fn with_parts(config: Config, store: Arc<dyn SessionStore>, database: Database) -> Arc<Self> {
        let auth = AuthService::new(store, config.session_ttl);

        Arc::new(Self {
            config,
            auth,
            database,
        })
    }

    pub fn query_defaults(&self) -> QueryDefaults {
        QueryDefaults {
            stale_time: self.config.query_stale_time,
        }
    }
}

impl FromRef<Arc<AppState>> for QueryDefaults {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.query_defaults()
    }
}
