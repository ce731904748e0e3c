//! Integration tests for registration, login, and profile.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_and_login() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "name": "Ada",
                "email": "ada@register.test",
                "password": "password123",
                "role": "guest",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["data"]["email"], "ada@register.test");
    // The password hash never leaves the server.
    assert!(response.body["data"].get("password_hash").is_none());

    let token = app.login("ada@register.test", "password123").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Ada");
    assert_eq!(response.body["data"]["role"], "guest");
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = TestApp::new().await;
    app.create_test_user("taken@dup.test", "password123", "guest").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "name": "Copycat",
                "email": "taken@dup.test",
                "password": "password123",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("CONFLICT"));
}

#[tokio::test]
async fn test_short_password_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "name": "Shorty",
                "email": "shorty@weak.test",
                "password": "short",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION"));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.create_test_user("victim@wrong.test", "password123", "guest").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({
                "email": "victim@wrong.test",
                "password": "not-the-password",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::new().await;
    app.create_test_user("editor@profile.test", "password123", "guest").await;
    let token = app.login("editor@profile.test", "password123").await;

    let response = app
        .request(
            "PUT",
            "/api/users/me",
            Some(json!({
                "name": "Edited Name",
                "phone_number": "+44 20 7946 0000",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["name"], "Edited Name");
    assert_eq!(response.body["data"]["phone_number"], "+44 20 7946 0000");

    // Empty names are rejected.
    let response = app
        .request(
            "PUT",
            "/api/users/me",
            Some(json!({ "name": "   " })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
