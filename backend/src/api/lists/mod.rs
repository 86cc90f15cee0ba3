//! Read-only shopping-list endpoints.

pub mod handlers;
pub mod routes;
pub mod validation;
