//! Catalog commands.

use gopher_shop_storefront::db::ProductRepository;

use super::CliError;

/// Insert the starter catalog. Products whose id already exists are skipped.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the insert fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    let inserted = ProductRepository::new(&pool).seed().await?;
    tracing::info!(inserted, "Seed complete");

    pool.close().await;
    Ok(())
}

/// Log every product, in id order.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the query fails.
pub async fn list_products() -> Result<(), CliError> {
    let pool = super::connect().await?;

    let products = ProductRepository::new(&pool).list().await?;
    if products.is_empty() {
        tracing::info!("Catalog is empty; run `shop-cli seed`");
    }
    for product in &products {
        tracing::info!(
            id = %product.id,
            price = %product.price,
            "{}",
            product.name
        );
    }

    pool.close().await;
    Ok(())
}
