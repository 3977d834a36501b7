//! End-to-end shopping flow: signup, login, add to cart, view cart, logout.

use axum::http::StatusCode;
use gopher_shop_core::Price;
use gopher_shop_integration_tests::TestApp;

#[tokio::test]
async fn test_alice_signs_up_logs_in_and_fills_her_cart() {
    let app = TestApp::spawn().await;

    // Signup sends the new user to the login page without a session
    let signup = app.signup("alice", "secret1").await;
    assert!(signup.redirects_to("/login"), "{signup:?}");
    assert!(signup.set_cookie("username").is_none());

    // Login hands out the raw username cookie
    let login = app.login("alice", "secret1").await;
    assert!(login.redirects_to("/"), "{login:?}");
    assert_eq!(login.cookie_value("username"), Some("alice"));
    let cookie = login.set_cookie("username").unwrap_or_default();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(!cookie.contains("Secure"));

    // Wrong password: form re-rendered with an error, no cookie
    let wrong = app.login("alice", "wrongpass").await;
    assert_eq!(wrong.status, StatusCode::OK);
    assert!(wrong.body.contains("Invalid credentials!"));
    assert!(wrong.set_cookie("username").is_none());

    // Add the T-shirt and land on the cart
    let add = app.post_form("/product?id=1", "", Some("alice")).await;
    assert!(add.redirects_to("/cart"), "{add:?}");

    let cart = app.get("/cart", Some("alice")).await;
    assert_eq!(cart.status, StatusCode::OK);
    assert!(cart.body.contains("Go T-Shirt"));
    assert!(cart.body.contains("$19.99"));

    // No cookie, no cart
    let anonymous = app.get("/cart", None).await;
    assert!(anonymous.redirects_to("/login"), "{anonymous:?}");
}

#[tokio::test]
async fn test_home_greets_logged_in_user() {
    let app = TestApp::spawn().await;
    app.signup("alice", "secret1").await;

    let home = app.get("/", Some("alice")).await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains("Hello, alice"));
    assert!(home.body.contains("Go T-Shirt"));
    assert!(home.body.contains("Go Mug"));

    let guest = app.get("/", None).await;
    assert!(!guest.body.contains("Hello,"));
    assert!(guest.body.contains("/login"));
}

#[tokio::test]
async fn test_adding_twice_lists_two_entries_and_sums_subtotal() {
    let app = TestApp::spawn().await;
    app.signup("alice", "secret1").await;

    for id in [2, 2, 1] {
        let add = app.post_form(&format!("/product?id={id}"), "", Some("alice")).await;
        assert!(add.redirects_to("/cart"));
    }
    assert_eq!(app.cart_rows("alice").await, 3);

    let cart = app.get("/cart", Some("alice")).await;
    assert_eq!(cart.body.matches("Go Mug").count(), 2);
    assert!(cart.body.contains("3 items"));

    let subtotal: Price = ["9.99", "9.99", "19.99"]
        .iter()
        .map(|p| p.parse::<Price>().unwrap_or_default())
        .sum();
    assert!(cart.body.contains(&subtotal.to_string()), "{}", cart.body);
}

#[tokio::test]
async fn test_carts_are_per_user() {
    let app = TestApp::spawn().await;
    app.signup("alice", "secret1").await;
    app.signup("bob", "hunter2").await;

    app.post_form("/product?id=1", "", Some("alice")).await;

    let bob_cart = app.get("/cart", Some("bob")).await;
    assert_eq!(bob_cart.status, StatusCode::OK);
    assert!(!bob_cart.body.contains("Go T-Shirt"));
    assert!(bob_cart.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_logout_clears_cookie_and_redirects_home() {
    let app = TestApp::spawn().await;

    let logout = app.get("/logout", Some("alice")).await;
    assert!(logout.redirects_to("/"), "{logout:?}");

    let cookie = logout.set_cookie("username").unwrap_or_default();
    assert!(cookie.contains("Max-Age=0"), "{cookie}");
}
