//! Password login, refresh, and logout through the composed router

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;
use suppleit_auth::{Role, TokenKind};

#[tokio::test]
async fn test_password_login() {
    let app = TestApp::new();
    app.seed_local("ann@example.com", "s3cret", Role::User).await;

    let response = app
        .post(
            "/api/auth/login",
            None,
            Some(json!({ "email": "ann@example.com", "password": "s3cret" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["member"]["origin"], "NONE");
    let access = response.body["accessToken"].as_str().unwrap();
    assert_eq!(app.auth.codec().get_email(access).unwrap(), "ann@example.com");
}

#[tokio::test]
async fn test_password_login_rejections() {
    let app = TestApp::new();
    app.seed_local("ann@example.com", "s3cret", Role::User).await;

    let response = app
        .post(
            "/api/auth/login",
            None,
            Some(json!({ "email": "ann@example.com", "password": "nope" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .post(
            "/api/auth/login",
            None,
            Some(json!({ "email": "ghost@example.com", "password": "s3cret" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .post(
            "/api/auth/login",
            None,
            Some(json!({ "email": "not-an-email", "password": "s3cret" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_login_reaches_admin_routes() {
    let app = TestApp::new();
    app.seed_local("root@suppleit.com", "pw", Role::Admin).await;

    let response = app
        .post(
            "/api/auth/login",
            None,
            Some(json!({ "email": "root@suppleit.com", "password": "pw" })),
        )
        .await;
    let access = response.body["accessToken"].as_str().unwrap().to_string();

    let response = app.get("/admin/ping", Some(&access)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_returns_new_access_token_and_same_refresh_token() {
    let app = TestApp::new();
    app.seed_local("ann@example.com", "s3cret", Role::User).await;
    let pair = app.auth.issue_pair("ann@example.com", Role::User).unwrap();

    let response = app
        .post(
            "/api/auth/refresh",
            None,
            Some(json!({ "refreshToken": pair.refresh_token })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["refreshToken"], pair.refresh_token.as_str());
    let access = response.body["accessToken"].as_str().unwrap();
    let claims = app.auth.codec().decode(access, TokenKind::Access).unwrap();
    assert_eq!(claims.sub, "ann@example.com");
    assert_eq!(claims.role, Some(Role::User));
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new();
    app.seed_local("ann@example.com", "s3cret", Role::User).await;
    let access = app.access_token("ann@example.com", Role::User);

    let response = app
        .post(
            "/api/auth/refresh",
            None,
            Some(json!({ "refreshToken": access })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_logout_then_refresh_still_mints_access() {
    let app = TestApp::new();
    app.seed_local("ann@example.com", "s3cret", Role::User).await;
    let pair = app.auth.issue_pair("ann@example.com", Role::User).unwrap();

    let response = app
        .post("/api/logout", Some(&pair.access_token), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Only the presented access token was revoked
    let response = app
        .post(
            "/api/auth/refresh",
            None,
            Some(json!({ "refreshToken": pair.refresh_token })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let fresh = response.body["accessToken"].as_str().unwrap();

    let response = app.get("/api/member/auth/me", Some(fresh)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_again_right_after_logout() {
    let app = TestApp::new();
    app.seed_local("ann@example.com", "s3cret", Role::User).await;
    let credentials = json!({ "email": "ann@example.com", "password": "s3cret" });

    let first = app
        .post("/api/auth/login", None, Some(credentials.clone()))
        .await;
    let first_access = first.body["accessToken"].as_str().unwrap().to_string();
    let response = app.post("/api/logout", Some(&first_access), None).await;
    assert_eq!(response.status, StatusCode::OK);

    // Same member, role and second as the revoked token
    let second = app.post("/api/auth/login", None, Some(credentials)).await;
    assert_eq!(second.status, StatusCode::OK);
    let second_access = second.body["accessToken"].as_str().unwrap();
    assert_ne!(second_access, first_access);

    let response = app.get("/api/member/auth/me", Some(second_access)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/api/member/auth/me", Some(&first_access)).await;
    assert_eq!(response.error_code(), "TOKEN_REVOKED");
}
