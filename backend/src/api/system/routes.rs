//! Routes for the root, offline and diagnostic endpoints.

use std::sync::Arc;

use axum::{routing::get, Router};

use super::handlers::{debug_auth, offline, root_handler};
use crate::state::AppState;

pub fn system_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root_handler))
        .route("/offline", get(offline))
        .route("/api/debug-auth", get(debug_auth))
}
