//! General-purpose middleware for the API.
//!
//! Request scoping and tracing: every request gets its own [`RequestScope`]
//! (request id plus lazily built query client) and runs inside an
//! `http.request` span.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use crate::query::RequestScope;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

pub async fn request_scope(mut request: Request, next: Next) -> Response {
    let scope = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map(RequestScope::new)
        .unwrap_or_else(RequestScope::generate);

    let span = tracing::info_span!(
        "http.request",
        request_id = %scope.request_id(),
        method = %request.method(),
        route = %request.uri().path(),
    );

    let request_id = scope.request_id().to_string();
    request.extensions_mut().insert(scope);

    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
