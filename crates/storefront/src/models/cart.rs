//! Cart domain types.

use gopher_shop_core::{CartEntryId, Price, ProductId};

/// One cart row joined with its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    /// The cart row this item came from.
    pub entry_id: CartEntryId,
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
}
