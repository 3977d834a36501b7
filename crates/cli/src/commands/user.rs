//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! shop-cli user create -u alice -p secret1
//! ```

use gopher_shop_storefront::services::auth::AuthService;

use super::CliError;

/// Register a new user with a hashed password.
///
/// # Errors
///
/// Returns an error if the username is invalid or taken, the password is
/// empty, or the database fails.
pub async fn create(username: &str, password: &str) -> Result<(), CliError> {
    let pool = super::connect().await?;

    let user = AuthService::new(&pool)
        .register_with_password(username, password)
        .await?;
    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    pool.close().await;
    Ok(())
}
