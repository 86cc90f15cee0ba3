//! Handlers for the welcome text, the offline page and the auth diagnostics.

use std::sync::Arc;

use axum::{extract::State, response::Html, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::{config::Config, state::AppState};

const OFFLINE_PAGE: &str = include_str!("offline.html");

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthDiagnostics {
    pub next_auth_url: Option<String>,
    pub has_next_auth_url: bool,
    pub node_env: Option<String>,
    pub timestamp: String,
    pub message: String,
}

impl AuthDiagnostics {
    pub fn from_config(config: &Config) -> Self {
        let has_next_auth_url = config.has_auth_url();
        let message = if has_next_auth_url {
            "NEXTAUTH_URL is set"
        } else {
            "NEXTAUTH_URL is missing"
        };

        Self {
            next_auth_url: config.auth_url.clone(),
            has_next_auth_url,
            node_env: config.environment.clone(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            message: message.to_string(),
        }
    }
}

pub async fn root_handler() -> &'static str {
    "Welcome to Larder!"
}

/// Reports whether the auth callback URL is configured. Always 200.
pub async fn debug_auth(State(state): State<Arc<AppState>>) -> Json<AuthDiagnostics> {
    Json(AuthDiagnostics::from_config(&state.config))
}

pub async fn offline() -> Html<&'static str> {
    Html(OFFLINE_PAGE)
}
