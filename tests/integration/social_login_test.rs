//! Social login: provider exchange, identity reconciliation, token issuance

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;
use suppleit_auth::Role;
use suppleit_common::Origin;
use suppleit_members::MemberStore;
use suppleit_oauth::{mock::MockIdentityProvider, ExternalProfile};

#[tokio::test]
async fn test_first_google_login_creates_account() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/social/login/google",
            None,
            Some(json!({ "code": "a@x.com" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let access = response.body["accessToken"].as_str().unwrap();
    assert!(response.body["refreshToken"].as_str().is_some());
    assert_eq!(response.body["member"]["email"], "a@x.com");
    assert_eq!(response.body["member"]["origin"], "GOOGLE");
    assert_eq!(response.body["member"]["role"], "USER");
    assert!(response.body["member"].get("passwordHash").is_none());

    assert_eq!(app.auth.codec().get_email(access).unwrap(), "a@x.com");
    assert_eq!(app.members.len(), 1);

    // The issued token works on protected routes
    let me = app.get("/api/member/auth/me", Some(access)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], "a@x.com");
}

#[tokio::test]
async fn test_same_email_through_other_provider_conflicts() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/social/login/google",
            None,
            Some(json!({ "code": "a@x.com" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .post(
            "/api/social/login/naver",
            None,
            Some(json!({ "code": "a@x.com" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "IDENTITY_CONFLICT");

    assert_eq!(app.members.len(), 1);
    let account = app.members.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(account.origin, Origin::Google);
}

#[tokio::test]
async fn test_local_account_can_link_social_login() {
    let app = TestApp::new();
    app.seed_local("root@suppleit.com", "pw", Role::Admin).await;

    let response = app
        .post(
            "/api/social/login/naver",
            None,
            Some(json!({ "code": "root@suppleit.com" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["member"]["role"], "ADMIN");
    let access = response.body["accessToken"].as_str().unwrap();
    assert_eq!(app.auth.codec().get_role(access).unwrap(), Role::Admin);
}

#[tokio::test]
async fn test_programmed_profile_display_name() {
    let google = MockIdentityProvider::new(Origin::Google).with_profile(
        "code-123",
        ExternalProfile {
            email: "ann@example.com".to_string(),
            display_name: "Ann".to_string(),
        },
    );
    let app = TestApp::with_providers(google, MockIdentityProvider::new(Origin::Naver));

    let response = app
        .post(
            "/api/social/login/google",
            None,
            Some(json!({ "code": "code-123" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["member"]["displayName"], "Ann");
}

#[tokio::test]
async fn test_provider_failure_is_bad_gateway() {
    let google = MockIdentityProvider::new(Origin::Google).with_failure("expired-code");
    let app = TestApp::with_providers(google, MockIdentityProvider::new(Origin::Naver));

    let response = app
        .post(
            "/api/social/login/google",
            None,
            Some(json!({ "code": "expired-code" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.error_code(), "UPSTREAM_PROVIDER_ERROR");
    assert!(app.members.is_empty());
}

#[tokio::test]
async fn test_unknown_provider_and_bad_payloads() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/social/login/kakao",
            None,
            Some(json!({ "code": "a@x.com" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .post("/api/social/login/google", None, Some(json!({ "code": "" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .post("/api/social/login/google", None, Some(json!({})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_concurrent_first_logins_create_one_account() {
    let app = std::sync::Arc::new(TestApp::new());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            app.post(
                "/api/social/login/google",
                None,
                Some(json!({ "code": "race@x.com" })),
            )
            .await
            .status
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }
    assert_eq!(app.members.len(), 1);
}
