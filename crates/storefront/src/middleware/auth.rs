//! Authentication extractors.
//!
//! - [`SessionUsername`] - the raw cookie value, for display only
//! - [`RequireAuth`] - the cookie resolved to a registered user, or a redirect to `/login`

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use gopher_shop_core::Username;

use super::session::read_session_user;
use crate::db::RepositoryError;
use crate::error::AppError;
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Extractor for the raw session username (empty when logged out).
///
/// The value is not checked against the user table.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(SessionUsername(username): SessionUsername) -> String {
///     if username.is_empty() { "Hello, guest!".into() } else { format!("Hello, {username}!") }
/// }
/// ```
pub struct SessionUsername(pub String);

impl<S> FromRequestParts<S> for SessionUsername
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(read_session_user(&parts.headers)))
    }
}

/// Extractor that requires a session naming a registered user.
///
/// The username is resolved to a user id once here; handlers use
/// [`CurrentUser::id`] directly for their writes.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> String {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but missing.
#[derive(Debug)]
pub enum AuthRejection {
    /// No cookie, or the cookie names no registered user.
    RedirectToLogin,
    /// The user lookup itself failed.
    Internal(RepositoryError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Internal(err) => AppError::Database(err).into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = read_session_user(&parts.headers);
        if raw.is_empty() {
            return Err(AuthRejection::RedirectToLogin);
        }

        let Ok(username) = Username::parse(&raw) else {
            tracing::debug!("session cookie holds an invalid username");
            return Err(AuthRejection::RedirectToLogin);
        };

        let user = AuthService::new(state.pool())
            .find_user(&username)
            .await
            .map_err(AuthRejection::Internal)?
            .ok_or_else(|| {
                tracing::debug!(username = %username, "session cookie names an unknown user");
                AuthRejection::RedirectToLogin
            })?;

        Ok(Self(CurrentUser::from(user)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Request, StatusCode, header};

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::db::test_support::empty_pool;

    async fn state_with_alice() -> AppState {
        let pool = empty_pool().await;
        AuthService::new(&pool)
            .register_with_password("alice", "secret1")
            .await
            .unwrap();
        AppState::new(StorefrontConfig::default(), pool)
    }

    fn parts_with_cookie(cookie: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .header(header::COOKIE, cookie)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    async fn require_auth(state: &AppState, cookie: &str) -> Result<RequireAuth, AuthRejection> {
        RequireAuth::from_request_parts(&mut parts_with_cookie(cookie), state).await
    }

    #[tokio::test]
    async fn test_registered_user_is_resolved() {
        let state = state_with_alice().await;

        let RequireAuth(user) = require_auth(&state, "username=alice").await.unwrap();
        assert_eq!(user.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_percent_encoded_name_is_not_decoded_into_another_user() {
        let state = state_with_alice().await;

        let rejection = require_auth(&state, "username=al%69ce").await.err();
        assert!(matches!(rejection, Some(AuthRejection::RedirectToLogin)));
    }

    #[tokio::test]
    async fn test_unknown_user_redirects_to_login() {
        let state = state_with_alice().await;

        let rejection = require_auth(&state, "username=ghost").await.err();
        assert!(matches!(rejection, Some(AuthRejection::RedirectToLogin)));
    }

    #[tokio::test]
    async fn test_store_failure_is_a_server_error() {
        let state = state_with_alice().await;
        state.pool().close().await;

        let rejection = require_auth(&state, "username=alice").await.err().unwrap();
        assert!(matches!(rejection, AuthRejection::Internal(_)));

        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_session_username_is_raw() {
        let state = state_with_alice().await;

        let SessionUsername(name) =
            SessionUsername::from_request_parts(&mut parts_with_cookie("username=al%69ce"), &state)
                .await
                .unwrap();
        assert_eq!(name, "al%69ce");
    }
}
