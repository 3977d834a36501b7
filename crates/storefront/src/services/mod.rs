//! Business logic services.
//!
//! Services sit between route handlers and repositories.

pub mod auth;
