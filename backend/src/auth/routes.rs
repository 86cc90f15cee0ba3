//! Defines the HTTP routes specifically for authentication.
//!
//! Mounted under `/api/auth` by the main router.

use std::sync::Arc;

use axum::{routing::get, Router};

use super::handlers::{current_session, sign_out};
use crate::state::AppState;

pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signout", get(sign_out).post(sign_out))
        .route("/session", get(current_session))
}
