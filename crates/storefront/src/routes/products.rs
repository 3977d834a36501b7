//! Product route handlers.
//!
//! `/product?id=N` serves the detail page on GET and adds the product to the
//! session user's cart on POST.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use gopher_shop_core::ProductId;

use crate::db::{CartRepository, ProductRepository, RepositoryError};
use crate::error::{AppError, record_breadcrumb};
use crate::filters;
use crate::middleware::{AuthRejection, RequireAuth, SessionUsername};
use crate::models::Product;
use crate::state::AppState;

/// Query parameters for the product page.
///
/// `id` stays a string so a malformed value is a 404 rather than a 400.
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub id: Option<String>,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub username: String,
    pub product: Product,
}

/// Resolve the `id` query parameter to a catalog product.
async fn find_product(state: &AppState, query: &ProductQuery) -> Result<Product, AppError> {
    let not_found = || AppError::NotFound("product".to_string());

    let id: ProductId = query
        .id
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(not_found)?;

    match ProductRepository::new(state.pool()).get(id).await {
        Ok(product) => Ok(product),
        Err(RepositoryError::NotFound) => Err(not_found()),
        Err(e) => Err(e.into()),
    }
}

/// Display a product.
#[instrument(skip_all, fields(id = ?query.id))]
pub async fn show(
    State(state): State<AppState>,
    SessionUsername(username): SessionUsername,
    Query(query): Query<ProductQuery>,
) -> Result<ProductTemplate, AppError> {
    let product = find_product(&state, &query).await?;

    Ok(ProductTemplate { username, product })
}

/// Add a product to the session user's cart.
///
/// The product is resolved first, so an unknown id is a 404 even without a
/// session. Each call appends one cart row.
#[instrument(skip_all, fields(id = ?query.id))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
    auth: Result<RequireAuth, AuthRejection>,
) -> Result<Response, AppError> {
    let product = find_product(&state, &query).await?;

    let user = match auth {
        Ok(RequireAuth(user)) => user,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    let entry_id = CartRepository::new(state.pool())
        .add_item(user.id, product.id)
        .await?;

    let product_id = product.id.to_string();
    record_breadcrumb(
        "cart",
        "Added product to cart",
        &[("product_id", product_id.as_str())],
    );
    tracing::info!(user_id = %user.id, product_id = %product.id, entry_id = %entry_id, "added to cart");

    Ok(Redirect::to("/cart").into_response())
}
