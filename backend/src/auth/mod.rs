//! Authentication module for resolving sessions and guarding access.
//!
//! This module provides the public interface for session-related functionality:
//! the session provider middleware wrapping every request, the validator service
//! behind it, the sign-out flow and the household roles.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use handlers::*;
pub use middleware::*;
pub use models::*;
pub use routes::*;
pub use service::*;
