//! System endpoints: welcome text, auth configuration diagnostics and the
//! offline fallback page.

pub mod handlers;
pub mod routes;
