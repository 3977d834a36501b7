//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. Route handlers that can fail
//! return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Database(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Request error"
                );

                // Don't expose internal error details to clients
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            Self::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
        }
    }
}

/// The text shown to a user for an auth failure.
///
/// Store failures collapse to a generic message rather than "username
/// already taken", so unrelated outages are not reported as name clashes.
#[must_use]
pub fn user_message(err: &AuthError) -> String {
    match err {
        AuthError::InvalidCredentials => "Invalid credentials!".to_string(),
        AuthError::DuplicateUsername => "Username already taken!".to_string(),
        AuthError::InvalidUsername(e) => format!("Invalid username: {e}"),
        AuthError::WeakPassword(msg) => format!("Invalid password: {msg}"),
        AuthError::Repository(_) | AuthError::PasswordHash => {
            "Something went wrong, please try again.".to_string()
        }
    }
}

/// Attach the logged-in user to subsequent Sentry events.
pub fn set_sentry_user(user_id: &impl ToString, username: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            username: Some(username.to_string()),
            ..Default::default()
        }));
    });
}

/// Detach the user from Sentry events (logout).
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Record a cart write as a Sentry breadcrumb with string key/value data.
///
/// ```rust,ignore
/// record_breadcrumb("cart", "Added product to cart", &[("product_id", "1")]);
/// ```
pub fn record_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let data = data
        .iter()
        .map(|(key, value)| {
            (
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            )
        })
        .collect();

    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        data,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_of(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[tokio::test]
    async fn test_not_found_message_reaches_client() {
        let response = AppError::NotFound("product".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await, "Not found: product");
    }

    #[tokio::test]
    async fn test_database_error_hides_detail() {
        let err = RepositoryError::DataCorruption("invalid price for product 1".to_string());
        let response = AppError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await, "Internal server error");
    }

    #[test]
    fn test_user_message_separates_store_failures_from_duplicates() {
        assert_eq!(
            user_message(&AuthError::DuplicateUsername),
            "Username already taken!"
        );
        assert_eq!(
            user_message(&AuthError::Repository(RepositoryError::DataCorruption(
                "x".to_string()
            ))),
            "Something went wrong, please try again."
        );
        assert_eq!(
            user_message(&AuthError::InvalidCredentials),
            "Invalid credentials!"
        );
    }
}
