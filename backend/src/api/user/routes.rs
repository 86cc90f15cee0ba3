//! Routes for user profile endpoints.

use std::sync::Arc;

use axum::{routing::get, Router};

use super::handlers::me;
use crate::state::AppState;

pub fn user_router() -> Router<Arc<AppState>> {
    Router::new().route("/me", get(me))
}
