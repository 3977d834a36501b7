//! Authentication route handlers.
//!
//! Username/password signup, login and logout. A successful login hands the
//! client a plain `username` cookie (see [`crate::middleware::session`]);
//! failures re-render the form with a message and never set a cookie.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user, user_message};
use crate::filters;
use crate::middleware::{SessionUsername, clear_session_user, set_session_user};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Signup and login form data.
#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub username: String,
    pub error: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub username: String,
    pub error: Option<String>,
}

/// Log an auth failure at a level matching whose fault it is.
fn log_auth_failure(action: &str, err: &AuthError) {
    match err {
        AuthError::Repository(_) | AuthError::PasswordHash => {
            tracing::error!(action, error = %err, "auth store failure");
        }
        _ => tracing::warn!(action, error = %err, "auth rejected"),
    }
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(SessionUsername(username): SessionUsername) -> SignupTemplate {
    SignupTemplate {
        username,
        error: None,
    }
}

/// Handle signup form submission.
///
/// On success the user is sent to `/login`; signup does not log them in.
#[instrument(skip_all, fields(username = %form.username))]
pub async fn signup(
    State(state): State<AppState>,
    SessionUsername(session_username): SessionUsername,
    Form(form): Form<CredentialsForm>,
) -> Response {
    match AuthService::new(state.pool())
        .register_with_password(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "user registered");
            Redirect::to("/login").into_response()
        }
        Err(e) => {
            log_auth_failure("signup", &e);
            SignupTemplate {
                username: session_username,
                error: Some(user_message(&e)),
            }
            .into_response()
        }
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(SessionUsername(username): SessionUsername) -> LoginTemplate {
    LoginTemplate {
        username,
        error: None,
    }
}

/// Handle login form submission.
#[instrument(skip_all, fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    SessionUsername(session_username): SessionUsername,
    Form(form): Form<CredentialsForm>,
) -> Response {
    match AuthService::new(state.pool())
        .login_with_password(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            set_sentry_user(&user.id, user.username.as_str());
            tracing::info!(user_id = %user.id, "user logged in");
            (set_session_user(jar, &user.username), Redirect::to("/")).into_response()
        }
        Err(e) => {
            log_auth_failure("login", &e);
            LoginTemplate {
                username: session_username,
                error: Some(user_message(&e)),
            }
            .into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Clear the session cookie and go home.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    clear_sentry_user();
    (clear_session_user(jar), Redirect::to("/"))
}
