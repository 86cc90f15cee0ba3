//! Module for user profile API endpoints.
//!
//! This module handles functionality related to the signed-in user that is
//! distinct from the core authentication process.

pub mod handlers;
pub mod routes;
