//! Gopher Shop Core - Shared types library.
//!
//! This crate provides the domain types used by every Gopher Shop component:
//! - `storefront` - Public-facing shop (library + server binary)
//! - `cli` - Command-line tools for schema, seeding and user management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP. Database encoding is opt-in through the `sqlite` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and usernames

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
