//! Catalog repository.
//!
//! Products are inserted by [`ProductRepository::seed`] and never modified at
//! runtime. Prices are read as text so both decimal-text and legacy `REAL`
//! columns decode without float rounding.

use sqlx::SqlitePool;

use gopher_shop_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::product::Product;

/// A row of the starter catalog: id, name, price, description.
pub type SeedProduct = (i64, &'static str, &'static str, &'static str);

/// Fixed starter catalog inserted at startup.
pub const STARTER_CATALOG: &[SeedProduct] = &[
    (1, "Go T-Shirt", "19.99", "A comfy Go-branded T-shirt"),
    (2, "Go Mug", "9.99", "A stylish mug for Go lovers"),
];

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    price: String,
    description: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price: Price = row.price.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            price,
            description: row.description,
        })
    }
}

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every product ordered by id ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is not a decimal.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            SELECT id, name, CAST(price AS TEXT) AS price, description
            FROM products
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(
            r"
            SELECT id, name, CAST(price AS TEXT) AS price, description
            FROM products
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Insert the starter catalog, leaving rows with existing ids untouched.
    ///
    /// Returns the number of rows actually inserted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if an insert fails.
    pub async fn seed(&self) -> Result<u64, RepositoryError> {
        self.seed_with(STARTER_CATALOG).await
    }

    /// Insert the given products, leaving rows with existing ids untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if an insert fails.
    pub async fn seed_with(&self, products: &[SeedProduct]) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for &(id, name, price, description) in products {
            inserted += sqlx::query(
                r"
                INSERT OR IGNORE INTO products (id, name, price, description)
                VALUES (?, ?, ?, ?)
                ",
            )
            .bind(id)
            .bind(name)
            .bind(price)
            .bind(description)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
