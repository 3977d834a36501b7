//! HTTP middleware and request extractors for the storefront.
//!
//! # Layer Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request spans)
//!
//! Identity is not a layer: handlers pull it from the `username` cookie with
//! the extractors in [`auth`].

pub mod auth;
pub mod session;

pub use auth::{AuthRejection, RequireAuth, SessionUsername};
pub use session::{SESSION_COOKIE_NAME, clear_session_user, read_session_user, set_session_user};
