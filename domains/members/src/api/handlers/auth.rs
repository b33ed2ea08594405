//! Session API handlers
//!
//! Implements:
//! - POST /api/auth/login - Password login
//! - POST /api/auth/refresh - New access token from a refresh token
//! - POST /api/logout - Revoke the presented token
//! - GET /api/member/auth/me - Current principal

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use suppleit_auth::{AuthUser, BearerToken, Role, TokenPair};
use suppleit_common::ValidatedJson;
use validator::Validate;

use crate::api::middleware::MembersState;
use crate::domain::error::MembersError;
use crate::domain::reconcile::MemberLogin;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Response for `GET /api/member/auth/me`
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub email: String,
    pub role: Role,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<MembersState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<MemberLogin>, MembersError> {
    let login = state.sessions.login(&request.email, &request.password).await?;
    Ok(Json(login))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<MembersState>,
    ValidatedJson(request): ValidatedJson<RefreshRequest>,
) -> Result<Json<TokenPair>, MembersError> {
    let pair = state.sessions.refresh(&request.refresh_token).await?;
    Ok(Json(pair))
}

/// POST /api/logout
pub async fn logout(
    State(state): State<MembersState>,
    AuthUser(principal): AuthUser,
    BearerToken(token): BearerToken,
) -> Result<Json<Value>, MembersError> {
    state.sessions.logout(&token).await?;
    tracing::info!(email = %principal.email, "Member logged out");

    Ok(Json(json!({ "message": "Logout successful" })))
}

/// GET /api/member/auth/me
pub async fn me(AuthUser(principal): AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        email: principal.email,
        role: principal.role,
    })
}
