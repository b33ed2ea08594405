//! Common test utilities and fixtures for integration tests
//!
//! Builds the full gateway router over the in-memory member store and mock
//! identity providers, plus a few stand-in routes (`/admin/ping`,
//! `/api/notice`) so access rules can be exercised end to end.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    extract::Path,
    http::{header::AUTHORIZATION, HeaderValue, Method, Request, StatusCode},
    routing::{get, post},
    Extension, Router,
};
use serde_json::Value;
use suppleit_app::{app_routes, policy::default_policy, protect};
use suppleit_auth::{
    AuthBackend, AuthConfig, GateDecision, InMemoryRevocationStore, Role, TokenCodec,
};
use suppleit_common::Origin;
use suppleit_members::{InMemoryMemberStore, MemberStore, MembersState, NewAccount};
use suppleit_oauth::{mock::MockIdentityProvider, IdentityProviders};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_only";

/// Gateway under test
pub struct TestApp {
    pub router: Router,
    pub auth: AuthBackend,
    pub members: Arc<InMemoryMemberStore>,
}

/// Status plus body, parsed as JSON when possible
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_providers(
            MockIdentityProvider::new(Origin::Google),
            MockIdentityProvider::new(Origin::Naver),
        )
    }

    pub fn with_providers(google: MockIdentityProvider, naver: MockIdentityProvider) -> Self {
        let members = Arc::new(InMemoryMemberStore::new());
        let auth = AuthBackend::new(
            TokenCodec::new(AuthConfig::new(TEST_SECRET)),
            Arc::new(InMemoryRevocationStore::new()),
            default_policy(),
        );
        let providers = IdentityProviders::new()
            .with(Arc::new(google))
            .with(Arc::new(naver));

        let state = MembersState::new(members.clone(), auth.clone(), providers);
        let routes = app_routes(state)
            .route("/admin/ping", get(|| async { "pong" }))
            .route("/api/notice", post(|| async { "created" }))
            .route("/api/notice/{id}", get(notice).put(notice).delete(notice));

        Self {
            router: protect(routes, auth.clone()),
            auth,
            members,
        }
    }

    /// Seed an account that logs in with a password
    pub async fn seed_local(&self, email: &str, password: &str, role: Role) {
        let account = NewAccount::local(email, password, "Seeded", role).unwrap();
        self.members.insert(account).await.unwrap();
    }

    pub fn access_token(&self, email: &str, role: Role) -> String {
        self.auth.codec().issue_access_token(email, role).unwrap()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<HeaderValue>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token.map(bearer), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        self.send(Method::POST, uri, token.map(bearer), body).await
    }
}

pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

/// Echoes the gate decision so tests can see which state a request took
async fn notice(
    Path(_id): Path<String>,
    Extension(decision): Extension<GateDecision>,
) -> String {
    format!("{:?}", decision)
}
