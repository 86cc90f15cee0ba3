//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the API domains (shopping
//! lists, user profile, system diagnostics), excluding the authentication
//! routes which are handled separately.

pub mod lists;
pub mod system;
pub mod user;
