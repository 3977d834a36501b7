//! Session-related types.

use gopher_shop_core::{UserId, Username};

use super::User;

/// Identity resolved from the session cookie.
///
/// Built once per request by the [`crate::middleware::RequireAuth`] extractor,
/// so handlers never re-query the user by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's username (also the cookie value).
    pub username: Username,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}
