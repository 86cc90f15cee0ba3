//! Handler functions for authentication-related API endpoints.
//!
//! Sign-out and the session lookup used by clients to bootstrap their
//! ambient session state.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{
        header::{CACHE_CONTROL, LOCATION, SET_COOKIE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{info, warn};

use super::{middleware::clear_session_cookie, models::CurrentSession};
use crate::{config::DEFAULT_SIGN_IN_PATH, state::AppState};

/// Signs the caller out and sends them to the sign-in page.
///
/// The redirect target does not depend on whether a session existed or
/// whether revoking it succeeded.
pub async fn sign_out(State(state): State<Arc<AppState>>, current: CurrentSession) -> Response {
    if let Some(session) = current.session() {
        info!(user_id = %session.user.id, "signing out");
        state.auth.sign_out(&session.token).await;
    }

    let location = HeaderValue::from_str(&state.config.sign_in_path).unwrap_or_else(|_| {
        warn!("sign-in path is not a valid header value, using {DEFAULT_SIGN_IN_PATH}");
        HeaderValue::from_static(DEFAULT_SIGN_IN_PATH)
    });

    let mut response = StatusCode::SEE_OTHER.into_response();
    let headers = response.headers_mut();
    headers.insert(LOCATION, location);
    headers.append(SET_COOKIE, clear_session_cookie());
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

    response
}

pub async fn current_session(current: CurrentSession) -> impl IntoResponse {
    match current.0 {
        Some(session) => Json(json!(session)),
        None => Json(json!({})),
    }
}
