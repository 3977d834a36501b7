//! Command implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use sqlx::SqlitePool;
use thiserror::Error;

use gopher_shop_storefront::config::{ConfigError, StorefrontConfig};
use gopher_shop_storefront::db::{self, RepositoryError};
use gopher_shop_storefront::services::auth::AuthError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying the schema failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// User registration failed.
    #[error("User error: {0}")]
    Auth(#[from] AuthError),
}

/// Open the configured database and make sure the schema exists.
async fn connect() -> Result<SqlitePool, CliError> {
    let config = StorefrontConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;
    db::migrate(&pool).await?;

    Ok(pool)
}
