//! Gopher Shop CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create tables if absent
//! shop-cli migrate
//!
//! # Insert the starter catalog (existing rows untouched)
//! shop-cli seed
//!
//! # Register a user
//! shop-cli user create -u alice -p secret1
//!
//! # Log the catalog
//! shop-cli products
//! ```
//!
//! The database is taken from `SHOP_DATABASE_URL` (or `DATABASE_URL`), as for
//! the storefront binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Gopher Shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the starter product catalog
    Seed,
    /// Log every product in the catalog
    Products,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Create {
        /// Username (letters, digits, `_`, `-`, `.`)
        #[arg(short, long)]
        username: String,

        /// Plaintext password, hashed before storage
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Products => commands::seed::list_products().await?,
        Commands::User { action } => match action {
            UserAction::Create { username, password } => {
                commands::user::create(&username, &password).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_user_create() {
        let cli = Cli::try_parse_from(["shop-cli", "user", "create", "-u", "alice", "-p", "secret1"])
            .unwrap_or_else(|e| panic!("{e}"));
        match cli.command {
            Commands::User {
                action: UserAction::Create { username, password },
            } => {
                assert_eq!(username, "alice");
                assert_eq!(password, "secret1");
            }
            _ => panic!("expected user create"),
        }
    }

    #[test]
    fn test_user_create_requires_password() {
        assert!(Cli::try_parse_from(["shop-cli", "user", "create", "-u", "alice"]).is_err());
    }
}
