//! Session cookie issue/read/clear.
//!
//! The session is the raw username stored in a cookie named `username`:
//! `HttpOnly`, path `/`, no `Secure` flag, no expiry and no signature.
//!
//! The value is client-controlled. Anyone can send `username=<name>` and be
//! treated as that user; nothing here can tell an issued cookie from a forged
//! one. [`crate::middleware::RequireAuth`] at least checks that the named user
//! exists before any write is attributed to them.

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use gopher_shop_core::Username;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "username";

/// Build the session cookie for `username`.
#[must_use]
pub fn session_cookie(username: &Username) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, username.as_str().to_owned()))
        .path("/")
        .http_only(true)
        .build()
}

/// Add the session cookie for `username` to the response jar.
#[must_use]
pub fn set_session_user(jar: CookieJar, username: &Username) -> CookieJar {
    jar.add(session_cookie(username))
}

/// Read the session username verbatim, or an empty string when absent.
///
/// The `Cookie` headers are parsed without percent-decoding (unlike
/// [`CookieJar::from_headers`]), so `al%69ce` stays `al%69ce`. No validation:
/// the value may name a user that does not exist.
#[must_use]
pub fn read_session_user(headers: &HeaderMap) -> String {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
        .unwrap_or_default()
}

/// Add a removal cookie (empty value, `Max-Age=0`, expiry in the past).
///
/// Sent even when the request carried no session cookie.
#[must_use]
pub fn clear_session_user(jar: CookieJar) -> CookieJar {
    let mut cookie = Cookie::build(SESSION_COOKIE_NAME)
        .path("/")
        .http_only(true)
        .build();
    cookie.make_removal();
    jar.add(cookie)
}
