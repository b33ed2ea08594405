//! Request gate behaviour through the composed router

mod common;

use axum::http::{HeaderValue, Method, StatusCode};
use chrono::Duration;
use common::{bearer, TestApp, TEST_SECRET};
use suppleit_auth::{AuthConfig, Role, TokenCodec};

#[tokio::test]
async fn test_public_route_bypasses_gate() {
    let app = TestApp::new();

    let response = app.get("/api/notice/1", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "Bypass");

    // A broken token on a public route is never inspected
    let response = app.get("/api/notice/1", Some("not-a-token")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "Bypass");
}

#[tokio::test]
async fn test_wrong_scheme_is_no_token() {
    let app = TestApp::new();

    let response = app
        .send(
            Method::PUT,
            "/api/notice/1",
            Some(HeaderValue::from_static("Token abc")),
            None,
        )
        .await;
    // Reaches the policy as anonymous, not as an invalid token
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_anonymous_request_to_public_rule_proceeds() {
    let app = TestApp::new();

    let response = app.get("/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "OK");
}

#[tokio::test]
async fn test_access_token_authenticates() {
    let app = TestApp::new();
    let token = app.access_token("ann@example.com", Role::User);

    let response = app.get("/api/member/auth/me", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "ann@example.com");
    assert_eq!(response.body["role"], "USER");
}

#[tokio::test]
async fn test_invalid_and_expired_tokens_rejected() {
    let app = TestApp::new();

    let response = app.get("/api/member/auth/me", Some("garbage")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_TOKEN");

    let expired_codec = TokenCodec::new(
        AuthConfig::new(TEST_SECRET).with_ttls(Duration::seconds(-30), Duration::days(7)),
    );
    let expired = expired_codec
        .issue_access_token("ann@example.com", Role::User)
        .unwrap();
    let response = app.get("/api/member/auth/me", Some(&expired)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["message"], "Invalid or expired token");

    let foreign = TokenCodec::new(AuthConfig::new("another-secret"))
        .issue_access_token("ann@example.com", Role::Admin)
        .unwrap();
    let response = app.get("/admin/ping", Some(&foreign)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = TestApp::new();
    let refresh = app
        .auth
        .codec()
        .issue_refresh_token("ann@example.com")
        .unwrap();

    let response = app.get("/api/member/auth/me", Some(&refresh)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_non_ascii_header_gets_generic_401() {
    let app = TestApp::new();

    let response = app
        .send(
            Method::GET,
            "/api/member/auth/me",
            Some(HeaderValue::from_bytes(b"Bearer abc\xe9def").unwrap()),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "AUTH_ERROR");
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::new();
    let token = app.access_token("ann@example.com", Role::User);

    let response = app.post("/api/logout", Some(&token), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logout successful");

    // Still cryptographically valid, but revoked
    assert!(app.auth.codec().validate(&token).is_valid());

    let response = app.get("/api/member/auth/me", Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "TOKEN_REVOKED");
    assert_eq!(
        response.body["error"]["message"],
        "Token has been invalidated (logged out)"
    );

    // Logging out again with the dead token is rejected at the gate
    let response = app.post("/api/logout", Some(&token), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // Other tokens for the same member are unaffected
    let fresh = app.access_token("ann@example.com", Role::User);
    let response = app.get("/api/member/auth/me", Some(&fresh)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_without_token() {
    let app = TestApp::new();

    let response = app.post("/api/logout", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_admin_routes() {
    let app = TestApp::new();
    let user = app.access_token("ann@example.com", Role::User);
    let admin = app.access_token("root@suppleit.com", Role::Admin);

    let response = app.get("/admin/ping", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.get("/admin/ping", Some(&user)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.get("/admin/ping", Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "pong");
}

#[tokio::test]
async fn test_notice_writes_need_admin() {
    let app = TestApp::new();
    let user = app.access_token("ann@example.com", Role::User);
    let admin = app.access_token("root@suppleit.com", Role::Admin);

    let response = app.post("/api/notice", Some(&user), None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.post("/api/notice", Some(&admin), None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .send(Method::DELETE, "/api/notice/7", Some(bearer(&admin)), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "Authenticated");

    let response = app
        .send(Method::DELETE, "/api/notice/7", Some(bearer(&user)), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
