/// Integration tests for the account pages
///
/// These drive the real router the way a browser would: urlencoded forms
/// in, HTML or redirects out, session cookies round-tripped between
/// requests. Backends are in-memory, so each test starts from nothing.

mod common;

use axum::http::StatusCode;
use common::{
    body_string, get, get_with_cookie, location, post_form, post_form_with_cookie,
    session_cookie, set_cookie_header, TestContext,
};
use studytrack_core::identity::service::IdentityService as _;

#[tokio::test]
async fn test_register_page_renders_form() {
    let ctx = TestContext::new();

    let response = ctx.send(get("/account/register")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(r#"name="full_name""#));
    assert!(body.contains(r#"name="email""#));
    assert!(body.contains(r#"name="password""#));
    assert!(body.contains(r#"name="confirm_password""#));
}

#[tokio::test]
async fn test_register_creates_account_and_signs_in() {
    let ctx = TestContext::new();

    let response = ctx
        .send(post_form(
            "/account/register",
            "full_name=Alice+A&email=alice@mail.com&password=Test123!&confirm_password=Test123!",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response).expect("Session cookie should be set");

    // The session is live: the landing page greets the new user
    let home = ctx.send(get_with_cookie("/", &cookie)).await;
    assert!(body_string(home).await.contains("Signed in as alice@mail.com"));

    let users = ctx.identity.users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "alice@mail.com");
    assert_eq!(users[0].full_name, "Alice A");
}

#[tokio::test]
async fn test_register_password_mismatch_rerenders_with_values() {
    let ctx = TestContext::new();

    let response = ctx
        .send(post_form(
            "/account/register",
            "full_name=Alice+A&email=alice@mail.com&password=Test123!&confirm_password=Other123!",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie_header(&response).is_none());

    let body = body_string(response).await;
    assert!(body.contains("Passwords do not match"));
    // Submitted values survive the round trip; passwords never do
    assert!(body.contains(r#"value="Alice A""#));
    assert!(body.contains(r#"value="alice@mail.com""#));
    assert!(!body.contains("Test123!"));

    assert!(ctx.identity.users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_weak_password_rejected() {
    let ctx = TestContext::new();

    let response = ctx
        .send(post_form(
            "/account/register",
            "full_name=Alice+A&email=alice@mail.com&password=alllowercase1&confirm_password=alllowercase1",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("uppercase"));

    assert!(ctx.identity.users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email_rejected() {
    let ctx = TestContext::new();
    ctx.register("Alice A", "alice@mail.com").await;

    let response = ctx
        .send(post_form(
            "/account/register",
            "full_name=Other+A&email=alice@mail.com&password=Test123!&confirm_password=Test123!",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Email is already registered"));
    assert_eq!(ctx.identity.users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_missing_fields_lists_errors() {
    let ctx = TestContext::new();

    let response = ctx.send(post_form("/account/register", "")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Full name is required"));
    assert!(body.contains("Invalid email format"));
}

#[tokio::test]
async fn test_login_success_redirects_home() {
    let ctx = TestContext::new();
    ctx.register("Alice A", "alice@mail.com").await;

    let response = ctx
        .send(post_form(
            "/account/login",
            "email=alice@mail.com&password=Test123!",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let cookie = session_cookie(&response).expect("Login should set the session cookie");
    let tasks = ctx.send(get_with_cookie("/tasks", &cookie)).await;
    assert_eq!(tasks.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password_rerenders_generic_error() {
    let ctx = TestContext::new();
    ctx.register("Alice A", "alice@mail.com").await;

    let response = ctx
        .send(post_form(
            "/account/login",
            "email=alice@mail.com&password=Wrong123!",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie_header(&response).is_none());

    let body = body_string(response).await;
    assert!(body.contains("Invalid email or password"));
    assert!(body.contains(r#"value="alice@mail.com""#));
    assert!(!body.contains("Wrong123!"));
}

#[tokio::test]
async fn test_login_unknown_email_gets_same_error() {
    let ctx = TestContext::new();
    ctx.register("Alice A", "alice@mail.com").await;

    // The message never reveals whether the account exists
    let wrong_password = ctx
        .send(post_form(
            "/account/login",
            "email=alice@mail.com&password=Wrong123!",
        ))
        .await;
    let unknown_email = ctx
        .send(post_form(
            "/account/login",
            "email=nobody@mail.com&password=Wrong123!",
        ))
        .await;

    assert_eq!(wrong_password.status(), StatusCode::OK);
    assert_eq!(unknown_email.status(), StatusCode::OK);
    assert!(body_string(wrong_password).await.contains("Invalid email or password"));
    assert!(body_string(unknown_email).await.contains("Invalid email or password"));
}

#[tokio::test]
async fn test_login_remember_me_extends_cookie() {
    let ctx = TestContext::new();
    ctx.register("Alice A", "alice@mail.com").await;

    let plain = ctx
        .send(post_form(
            "/account/login",
            "email=alice@mail.com&password=Test123!",
        ))
        .await;
    let remembered = ctx
        .send(post_form(
            "/account/login",
            "email=alice@mail.com&password=Test123!&remember_me=on",
        ))
        .await;

    let plain_cookie = set_cookie_header(&plain).expect("Session cookie should be set");
    let remembered_cookie = set_cookie_header(&remembered).expect("Session cookie should be set");

    assert!(!plain_cookie.contains("Max-Age"));
    assert!(remembered_cookie.contains("Max-Age=2592000"));
}

#[tokio::test]
async fn test_logout_revokes_session_and_clears_cookie() {
    let ctx = TestContext::new();
    let cookie = ctx.register("Alice A", "alice@mail.com").await;

    let response = ctx
        .send(post_form_with_cookie("/account/logout", &cookie, ""))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/account/login");

    let cleared = set_cookie_header(&response).expect("Logout should clear the cookie");
    assert!(cleared.contains("Expires=Thu, 01 Jan 1970"));

    // The token is dead server-side too, not just dropped by the browser
    let tasks = ctx.send(get_with_cookie("/tasks", &cookie)).await;
    assert_eq!(tasks.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&tasks), "/account/login");
}

#[tokio::test]
async fn test_logout_without_session_still_redirects() {
    let ctx = TestContext::new();

    let response = ctx.send(post_form("/account/logout", "")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/account/login");
}

#[tokio::test]
async fn test_users_listing_is_public_json() {
    let ctx = TestContext::new();
    ctx.register("Alice A", "alice@mail.com").await;
    ctx.register("Bob B", "bob@mail.com").await;

    // No cookie on this request; the listing is public
    let response = ctx.send(get("/account/users")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let users: serde_json::Value = serde_json::from_str(&body).unwrap();

    let users = users.as_array().expect("Listing should be a JSON array");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["email"], "alice@mail.com");
    assert_eq!(users[0]["full_name"], "Alice A");
    assert_eq!(users[1]["email"], "bob@mail.com");

    // Summaries only: nothing credential-shaped leaves the server
    assert!(body.contains("username"));
    assert!(!body.contains("password_hash"));
}
