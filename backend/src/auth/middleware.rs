//! Session provider middleware and the extractors built on top of it.
//!
//! [`session_provider`] wraps the whole router: it reads the session cookie,
//! asks the [`AuthService`](super::AuthService) to validate it and exposes the
//! result to handlers as a [`CurrentSession`]. A cookie that no longer resolves
//! to a live session gets the caller signed out: the store entry is revoked and
//! the response clears the cookie. When the store itself fails the caller is
//! treated as anonymous for that request only and the cookie is left alone.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use larder_adapters::Session;
use tracing::{debug, warn};

use super::{errors::AuthError, models::CurrentSession};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "larder.session-token";

pub async fn session_provider(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = session_token(request.headers());

    let mut invalid_token = None;
    let session = match token {
        Some(token) => match state.auth.validate(&token).await {
            Ok(Some(session)) => Some(session),
            Ok(None) => {
                invalid_token = Some(token);
                None
            }
            Err(e) => {
                warn!("session store unavailable, continuing anonymously: {e}");
                None
            }
        },
        None => None,
    };

    request
        .extensions_mut()
        .insert(CurrentSession(session));

    let mut response = next.run(request).await;

    if let Some(token) = invalid_token {
        debug!("clearing invalid session cookie");
        state.auth.sign_out(&token).await;

        if !clears_session_cookie(response.headers()) {
            response
                .headers_mut()
                .append(SET_COOKIE, clear_session_cookie());
        }
    }

    response
}

fn clears_session_cookie(headers: &HeaderMap) -> bool {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .any(|value| *value == clear_session_cookie())
}

/// Extracts the session token from the request's `Cookie` headers.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("larder.session-token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Extractor for routes that need a signed-in caller; rejects with 401.
#[derive(Debug, Clone)]
pub struct RequireSession(pub Session);

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentSession>()
            .and_then(|current| current.0.clone())
            .map(RequireSession)
            .ok_or(AuthError::Unauthenticated)
    }
}
