//! Per-request cache accessor.
//!
//! The request-scope middleware inserts a fresh [`RequestScope`] into every
//! request. Its query client is built lazily on first access and reused for
//! the rest of that request; the scope is dropped with the request.

use std::{
    convert::Infallible,
    sync::{Arc, OnceLock},
};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use rand::RngCore;
use tracing::debug;

use super::client::{QueryClient, QueryDefaults};

#[derive(Clone, Debug)]
pub struct RequestScope {
    request_id: Arc<str>,
    query_client: Arc<OnceLock<Arc<QueryClient>>>,
}

impl RequestScope {
    pub fn new(request_id: impl Into<Arc<str>>) -> Self {
        Self {
            request_id: request_id.into(),
            query_client: Arc::new(OnceLock::new()),
        }
    }

    /// Scope with a random 16-hex-character request id.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 8];
        rand::thread_rng().fill_bytes(&mut bytes);

        Self::new(hex::encode(bytes))
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// The request's query client, built with `defaults` on first call.
    pub fn query_client(&self, defaults: QueryDefaults) -> Arc<QueryClient> {
        self.query_client
            .get_or_init(|| {
                debug!(request_id = %self.request_id, "creating request query client");
                Arc::new(QueryClient::with_defaults(defaults))
            })
            .clone()
    }

    pub fn has_query_client(&self) -> bool {
        self.query_client.get().is_some()
    }
}

/// Extractor handing a handler its request's query client.
///
/// Falls back to creating the scope when no middleware installed one, so
/// several extractions in the same request still share one client.
#[derive(Clone, Debug)]
pub struct RequestQueryClient(pub Arc<QueryClient>);

impl<S> FromRequestParts<S> for RequestQueryClient
where
    S: Send + Sync,
    QueryDefaults: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let scope = match parts.extensions.get::<RequestScope>() {
            Some(scope) => scope.clone(),
            None => {
                let scope = RequestScope::generate();
                parts.extensions.insert(scope.clone());
                scope
            }
        };

        Ok(Self(scope.query_client(QueryDefaults::from_ref(state))))
    }
}
