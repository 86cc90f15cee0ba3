//! Request-scoped query cache.
//!
//! A [`QueryClient`] maps query keys to fetched results with a staleness
//! window. Each request gets its own client through [`RequestScope`]; no
//! client is ever shared between requests.

pub mod client;
pub mod scope;

pub use client::{QueryClient, QueryDefaults, QueryKey, DEFAULT_STALE_TIME};
pub use scope::{RequestQueryClient, RequestScope};
