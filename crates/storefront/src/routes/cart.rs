//! Cart route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use gopher_shop_core::Price;

use crate::db::CartRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CartItem;
use crate::state::AppState;

/// Cart contents with derived totals.
#[derive(Debug, Clone)]
pub struct CartView {
    /// One entry per cart row, in the order they were added.
    pub items: Vec<CartItem>,
    pub item_count: usize,
    pub subtotal: Price,
}

impl From<Vec<CartItem>> for CartView {
    fn from(items: Vec<CartItem>) -> Self {
        let subtotal = items.iter().map(|item| item.price).sum();
        Self {
            item_count: items.len(),
            subtotal,
            items,
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub username: String,
    pub cart: CartView,
}

/// Display the cart page.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<CartTemplate, AppError> {
    let items = CartRepository::new(state.pool())
        .list_items(user.id)
        .await?;

    Ok(CartTemplate {
        username: user.username.into_inner(),
        cart: CartView::from(items),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gopher_shop_core::{CartEntryId, ProductId};

    fn item(entry: i64, product: i64, cents: i64) -> CartItem {
        CartItem {
            entry_id: CartEntryId::new(entry),
            product_id: ProductId::new(product),
            name: format!("product {product}"),
            price: Price::from_cents(cents),
        }
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(Vec::new());
        assert_eq!(view.item_count, 0);
        assert_eq!(view.subtotal, Price::ZERO);
    }

    #[test]
    fn test_cart_view_counts_duplicates() {
        let view = CartView::from(vec![item(1, 1, 1999), item(2, 2, 999), item(3, 2, 999)]);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal.to_string(), "$39.97");
        assert_eq!(view.items[0].product_id, ProductId::new(1));
    }
}
