//! Routes for reading shopping lists.

use std::sync::Arc;

use axum::{routing::get, Router};

use super::handlers::get_list;
use crate::state::AppState;

pub fn lists_router() -> Router<Arc<AppState>> {
    Router::new().route("/{id}", get(get_list))
}
