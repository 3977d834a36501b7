//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::SessionUsername;
use crate::models::Product;
use crate::state::AppState;

/// Home page template: the full catalog.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    /// Raw session username, empty when logged out.
    pub username: String,
    pub products: Vec<Product>,
}

/// Display the home page.
///
/// The greeting uses the cookie value as-is; it is never looked up.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    SessionUsername(username): SessionUsername,
) -> Result<HomeTemplate, AppError> {
    let products = ProductRepository::new(state.pool()).list().await?;

    Ok(HomeTemplate { username, products })
}
