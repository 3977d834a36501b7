//! User domain types.

use gopher_shop_core::{UserId, Username};

/// A shop account.
///
/// The password hash is deliberately not part of this type; it is only read
/// by [`crate::db::UserRepository::get_password_hash`] during login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique username.
    pub username: Username,
}
