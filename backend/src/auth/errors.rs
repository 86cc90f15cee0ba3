//! Custom error types specific to authentication failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use larder_adapters::AdapterError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("not a member of this household")]
    Forbidden,

    #[error("session store error: {0}")]
    Store(#[from] AdapterError),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
