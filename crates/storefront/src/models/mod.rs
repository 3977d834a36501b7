//! Domain models for the storefront.
//!
//! These are validated domain objects, separate from the database row types
//! in [`crate::db`].

pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use cart::CartItem;
pub use product::Product;
pub use session::CurrentUser;
pub use user::User;
