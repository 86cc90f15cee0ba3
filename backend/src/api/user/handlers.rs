//! Handler functions for user profile endpoints.

use axum::Json;
use larder_adapters::SessionUser;

use crate::auth::RequireSession;

pub async fn me(RequireSession(session): RequireSession) -> Json<SessionUser> {
    Json(session.user)
}
