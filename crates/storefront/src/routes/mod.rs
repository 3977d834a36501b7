//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /               - Product listing (+ session greeting)
//! GET  /health         - Liveness check
//! GET  /health/ready   - Readiness check (database ping)
//!
//! # Auth
//! GET  /signup         - Signup page
//! POST /signup         - Signup action, redirects to /login
//! GET  /login          - Login page
//! POST /login          - Login action, sets the `username` cookie
//! GET  /logout         - Clears the cookie, redirects to /
//!
//! # Products & cart
//! GET  /product?id=N   - Product detail (404 if unknown)
//! POST /product?id=N   - Add to cart (requires session), redirects to /cart
//! GET  /cart           - Cart page (requires session)
//!
//! GET  /static/*       - Static assets
//! ```

pub mod auth;
pub mod cart;
pub mod health;
pub mod home;
pub mod products;

use axum::{
    Router,
    http::StatusCode,
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
}

/// Create all page routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(auth_routes())
        .route("/product", get(products::show).post(products::add_to_cart))
        .route("/cart", get(cart::show))
}

/// Build the complete application: pages, health checks, static files and
/// request tracing, bound to `state`.
///
/// Sentry layers are added by the binary, so tests can drive this router
/// directly.
pub fn app(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(routes())
        .nest_service("/static", static_dir)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Fallback for unknown paths.
async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 page not found")
}
