//! Cart repository.
//!
//! The cart is append-only: each add inserts a row, and the quantity of a
//! product is the number of rows for it. Nothing here checks that the user or
//! product exists; callers resolve both before writing.

use sqlx::SqlitePool;

use gopher_shop_core::{CartEntryId, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::cart::CartItem;

#[derive(sqlx::FromRow)]
struct CartItemRow {
    entry_id: CartEntryId,
    product_id: ProductId,
    name: String,
    price: String,
}

impl TryFrom<CartItemRow> for CartItem {
    type Error = RepositoryError;

    fn try_from(row: CartItemRow) -> Result<Self, Self::Error> {
        let price: Price = row.price.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!(
                "invalid price for product {}: {e}",
                row.product_id
            ))
        })?;

        Ok(Self {
            entry_id: row.entry_id,
            product_id: row.product_id,
            name: row.name,
            price,
        })
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a cart row for `(user_id, product_id)`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<CartEntryId, RepositoryError> {
        let (id,): (CartEntryId,) = sqlx::query_as(
            r"
            INSERT INTO cart (user_id, product_id)
            VALUES (?, ?)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// List a user's cart rows joined with the catalog, in insertion order.
    ///
    /// Rows whose product no longer exists are dropped by the inner join.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is not a decimal.
    pub async fn list_items(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows: Vec<CartItemRow> = sqlx::query_as(
            r"
            SELECT cart.id AS entry_id,
                   products.id AS product_id,
                   products.name AS name,
                   CAST(products.price AS TEXT) AS price
            FROM cart
            JOIN products ON cart.product_id = products.id
            WHERE cart.user_id = ?
            ORDER BY cart.id ASC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartItem::try_from).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::ProductRepository;
    use crate::db::test_support::empty_pool;

    async fn seeded_pool() -> SqlitePool {
        let pool = empty_pool().await;
        ProductRepository::new(&pool).seed().await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_add_then_list_includes_product() {
        let pool = seeded_pool().await;
        let cart = CartRepository::new(&pool);
        let user = UserId::new(1);

        cart.add_item(user, ProductId::new(1)).await.unwrap();
        let items = cart.list_items(user).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, ProductId::new(1));
        assert_eq!(items[0].name, "Go T-Shirt");
        assert_eq!(items[0].price.to_string(), "$19.99");
    }

    #[tokio::test]
    async fn test_adding_twice_yields_two_entries() {
        let pool = seeded_pool().await;
        let cart = CartRepository::new(&pool);
        let user = UserId::new(1);

        let first = cart.add_item(user, ProductId::new(2)).await.unwrap();
        let second = cart.add_item(user, ProductId::new(2)).await.unwrap();
        let items = cart.list_items(user).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.product_id == ProductId::new(2)));
    }

    #[tokio::test]
    async fn test_items_are_in_insertion_order() {
        let pool = seeded_pool().await;
        let cart = CartRepository::new(&pool);
        let user = UserId::new(1);

        cart.add_item(user, ProductId::new(2)).await.unwrap();
        cart.add_item(user, ProductId::new(1)).await.unwrap();

        let ids: Vec<i64> = cart
            .list_items(user)
            .await
            .unwrap()
            .iter()
            .map(|i| i.product_id.as_i64())
            .collect();
        assert_eq!(ids, [2, 1]);
    }

    #[tokio::test]
    async fn test_carts_are_per_user() {
        let pool = seeded_pool().await;
        let cart = CartRepository::new(&pool);

        cart.add_item(UserId::new(1), ProductId::new(1)).await.unwrap();

        assert!(cart.list_items(UserId::new(2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dangling_product_is_stored_but_not_listed() {
        let pool = seeded_pool().await;
        let cart = CartRepository::new(&pool);
        let user = UserId::new(1);

        cart.add_item(user, ProductId::new(404)).await.unwrap();

        let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cart WHERE user_id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
        assert!(cart.list_items(user).await.unwrap().is_empty());
    }
}
