//! Module for background services.
//!
//! This module encapsulates work that runs beside the request path, such as
//! the periodic session validator.

pub mod session_validator;
