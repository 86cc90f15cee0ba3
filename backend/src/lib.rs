//! Larder: the backend of a household shopping-list application.
//!
//! Every request passes through two layers before reaching a handler:
//!
//! - the request scope, which tags the request with an id, opens its tracing
//!   span and carries the request's own query client, built lazily on first
//!   use and dropped with the request;
//! - the session provider, which resolves the session cookie through the
//!   session store and signs the caller out when the cookie no longer maps to
//!   a live session.
//!
//! A background validator sweeps expired sessions out of the store.

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    middleware::{from_fn, from_fn_with_state},
    Router,
};
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod query;
pub mod services;
pub mod state;

use api::{lists::routes::lists_router, system::routes::system_router, user::routes::user_router};
use auth::{auth_router, session_provider};
use config::Config;
use errors::AppError;
use middleware::request_scope;
use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .merge(system_router())
        .nest("/api/auth", auth_router())
        .nest("/api/user", user_router())
        .nest("/api/lists", lists_router())
        .layer(from_fn_with_state(state.clone(), session_provider))
        .layer(from_fn(request_scope))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<(), AppError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load();

    info!("Initializing state...");
    let state = AppState::new(config).await?;

    let validator = services::session_validator::spawn(
        state.auth.store().clone(),
        state.config.session_sweep_interval,
    );

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    validator.abort();
    info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
