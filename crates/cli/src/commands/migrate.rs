//! Database migration command.
//!
//! Migrations live in `crates/storefront/migrations/` and are embedded in the
//! storefront library; the storefront binary also applies them at startup.

use super::CliError;

/// Apply pending migrations.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a migration fails.
pub async fn run() -> Result<(), CliError> {
    tracing::info!("Running migrations...");
    let pool = super::connect().await?;
    pool.close().await;

    tracing::info!("Migrations complete!");
    Ok(())
}
