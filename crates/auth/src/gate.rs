//! Request gate and authorization middleware
//!
//! `request_gate` runs once per request and resolves to exactly one of
//! bypass, no-token, authenticated, or reject. `authorize` runs after it
//! and applies the route policy to whatever principal the gate attached.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::backend::AuthBackend;
use crate::error::AuthError;
use crate::types::Principal;

/// Gate result recorded in the request extensions for downstream handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Bypass,
    NoToken,
    Authenticated,
}

#[derive(Debug)]
pub enum GateOutcome {
    /// Public route; no token was inspected
    Bypass,
    /// No bearer token; the request continues unauthenticated
    NoToken,
    Authenticated { principal: Principal, token: String },
    Reject(AuthError),
}

impl GateOutcome {
    pub fn decision(&self) -> Option<GateDecision> {
        match self {
            GateOutcome::Bypass => Some(GateDecision::Bypass),
            GateOutcome::NoToken => Some(GateDecision::NoToken),
            GateOutcome::Authenticated { .. } => Some(GateDecision::Authenticated),
            GateOutcome::Reject(_) => None,
        }
    }
}

/// The raw bearer token of an authenticated request, kept for logout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedToken(pub String);

/// Authenticate the request, or short-circuit with a 401
pub async fn request_gate(
    State(backend): State<AuthBackend>,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();
    let outcome = backend
        .evaluate(&parts.method, parts.uri.path(), &parts.headers)
        .await;

    if let Some(decision) = outcome.decision() {
        parts.extensions.insert(decision);
    }

    match outcome {
        GateOutcome::Bypass | GateOutcome::NoToken => {}
        GateOutcome::Authenticated { principal, token } => {
            tracing::debug!(
                email = %principal.email,
                role = %principal.role,
                "Request authenticated"
            );
            parts.extensions.insert(principal);
            parts.extensions.insert(PresentedToken(token));
        }
        GateOutcome::Reject(err) => return err.into_response(),
    }

    next.run(Request::from_parts(parts, body)).await
}

/// Enforce the route policy against the gate's principal
pub async fn authorize(State(backend): State<AuthBackend>, req: Request, next: Next) -> Response {
    let result = backend.policy().authorize(
        req.method(),
        req.uri().path(),
        req.extensions().get::<Principal>(),
    );

    if let Err(err) = result {
        tracing::warn!(
            method = %req.method(),
            path = %req.uri().path(),
            error = %err,
            "Request denied by route policy"
        );
        return err.into_response();
    }

    next.run(req).await
}
