//! Gopher Shop storefront library.
//!
//! Product listing, product detail, an append-only cart and username/password
//! accounts over SQLite, rendered with Askama. The binary in `main.rs` and the
//! integration tests both build the router through [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::app;
pub use state::AppState;
