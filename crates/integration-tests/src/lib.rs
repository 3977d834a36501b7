//! Integration test harness for the Gopher Shop storefront.
//!
//! Each [`TestApp`] owns a fresh in-memory SQLite database with the schema
//! applied and the starter catalog seeded, and drives the real router with
//! `tower::ServiceExt::oneshot`. No sockets are opened.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gopher-shop-integration-tests
//! ```

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use gopher_shop_storefront::config::StorefrontConfig;
use gopher_shop_storefront::db::{self, ProductRepository};
use gopher_shop_storefront::{AppState, app};

/// A storefront wired to its own in-memory database.
pub struct TestApp {
    router: Router,
    pub pool: SqlitePool,
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The raw `Set-Cookie` header for `name`, if the response sets one.
    #[must_use]
    pub fn set_cookie(&self, name: &str) -> Option<&str> {
        let prefix = format!("{name}=");
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
    }

    /// The value part of the `Set-Cookie` header for `name`.
    #[must_use]
    pub fn cookie_value(&self, name: &str) -> Option<&str> {
        let raw = self.set_cookie(name)?;
        let pair = raw.split(';').next()?;
        pair.split_once('=').map(|(_, value)| value)
    }

    /// Whether the response redirects (303) to `path`.
    #[must_use]
    pub fn redirects_to(&self, path: &str) -> bool {
        self.status == StatusCode::SEE_OTHER && self.location() == Some(path)
    }
}

impl TestApp {
    /// Build a storefront over a fresh, migrated and seeded database.
    pub async fn spawn() -> Self {
        let pool = db::create_memory_pool()
            .await
            .expect("in-memory pool connects");
        db::migrate(&pool).await.expect("migrations apply");
        ProductRepository::new(&pool)
            .seed()
            .await
            .expect("catalog seeds");

        let config = StorefrontConfig {
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static").into(),
            ..StorefrontConfig::default()
        };

        Self {
            router: app(AppState::new(config, pool.clone())),
            pool,
        }
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn request(method: &str, uri: &str, cookie: Option<&str>) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match cookie {
            Some(username) => builder.header(header::COOKIE, format!("username={username}")),
            None => builder,
        }
    }

    /// GET `uri`, optionally carrying a `username` cookie.
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let request = Self::request("GET", uri, cookie)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    /// POST an urlencoded form to `uri`, optionally carrying a `username` cookie.
    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> TestResponse {
        let request = Self::request("POST", uri, cookie)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_owned()))
            .expect("valid request");
        self.send(request).await
    }

    /// Sign up through the HTTP form.
    pub async fn signup(&self, username: &str, password: &str) -> TestResponse {
        self.post_form(
            "/signup",
            &format!("username={username}&password={password}"),
            None,
        )
        .await
    }

    /// Log in through the HTTP form.
    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.post_form(
            "/login",
            &format!("username={username}&password={password}"),
            None,
        )
        .await
    }

    /// Number of cart rows stored for `username`.
    pub async fn cart_rows(&self, username: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM cart JOIN users ON cart.user_id = users.id WHERE users.username = ?",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .expect("count query runs");
        count
    }
}
