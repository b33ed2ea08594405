//! Axum extractors for authentication
//!
//! Both read what the request gate left in the request extensions, so they
//! only work on routers wrapped by `request_gate`.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AuthError;
use crate::gate::PresentedToken;
use crate::types::Principal;

/// Authenticated caller
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthUser)
            .ok_or(AuthError::MissingAuthorization)
    }
}

/// Raw bearer token the caller authenticated with
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<PresentedToken>()
            .map(|presented| BearerToken(presented.0.clone()))
            .ok_or(AuthError::MissingAuthorization)
    }
}
