//! Concrete authentication backend
//!
//! Bundles the token codec, the revocation store, and the route policy.
//! Cheap to clone; domain states expose it via `FromRef`:
//! ```ignore
//! impl FromRef<MyDomainState> for AuthBackend {
//!     fn from_ref(state: &MyDomainState) -> Self {
//!         state.auth.clone()
//!     }
//! }
//! ```

use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap, Method};
use suppleit_common::token_fingerprint;

use crate::error::AuthError;
use crate::gate::GateOutcome;
use crate::revocation::RevocationStore;
use crate::rules::RoutePolicy;
use crate::token::{extract_bearer_token, TokenCodec, TokenPair};
use crate::types::{Principal, Role, TokenKind};

/// Hex characters of a token fingerprint that may appear in logs
const LOGGED_FINGERPRINT_LEN: usize = 12;

#[derive(Clone)]
pub struct AuthBackend {
    codec: Arc<TokenCodec>,
    revocations: Arc<dyn RevocationStore>,
    policy: Arc<RoutePolicy>,
}

impl AuthBackend {
    pub fn new(
        codec: TokenCodec,
        revocations: Arc<dyn RevocationStore>,
        policy: RoutePolicy,
    ) -> Self {
        Self {
            codec: Arc::new(codec),
            revocations,
            policy: Arc::new(policy),
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }

    pub fn revocations(&self) -> &Arc<dyn RevocationStore> {
        &self.revocations
    }

    pub fn issue_pair(&self, email: &str, role: Role) -> Result<TokenPair, AuthError> {
        self.codec.issue_pair(email, role)
    }

    /// Invalidate `token` until its natural expiry.
    ///
    /// Tokens that are already expired or fail verification are ignored;
    /// the codec rejects them on its own.
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        let Some(expires_at) = self.codec.expires_at(token) else {
            tracing::debug!(
                token_fp = %token_tag(token),
                "Ignoring revoke of invalid or expired token"
            );
            return Ok(());
        };

        self.revocations
            .insert(&token_fingerprint(token), expires_at)
            .await?;

        tracing::info!(
            token_fp = %token_tag(token),
            expires_at = %expires_at,
            "Token revoked"
        );
        Ok(())
    }

    pub async fn is_revoked(&self, token: &str) -> Result<bool, AuthError> {
        self.revocations.contains(&token_fingerprint(token)).await
    }

    /// Run the gate state machine for one request
    pub async fn evaluate(&self, method: &Method, path: &str, headers: &HeaderMap) -> GateOutcome {
        if self.policy.is_public(method, path) {
            return GateOutcome::Bypass;
        }

        let token = match extract_bearer_token(headers.get(AUTHORIZATION)) {
            Ok(Some(token)) => token,
            Ok(None) => return GateOutcome::NoToken,
            Err(e) => {
                tracing::error!(error = %e, path = %path, "Failed to read authorization header");
                return GateOutcome::Reject(AuthError::Internal);
            }
        };

        // Revocation is checked before any signature work
        match self.is_revoked(&token).await {
            Ok(false) => {}
            Ok(true) => {
                tracing::info!(
                    token_fp = %token_tag(&token),
                    path = %path,
                    "Rejected revoked token"
                );
                return GateOutcome::Reject(AuthError::TokenRevoked);
            }
            Err(e) => {
                tracing::error!(error = %e, path = %path, "Revocation lookup failed");
                return GateOutcome::Reject(AuthError::Internal);
            }
        }

        let validation = self.codec.validate(&token);
        if !validation.is_valid() {
            tracing::warn!(
                reason = validation.reason(),
                token_fp = %token_tag(&token),
                path = %path,
                "Rejected invalid token"
            );
            return GateOutcome::Reject(AuthError::InvalidToken);
        }

        let claims = match self.codec.decode(&token, TokenKind::Access) {
            Ok(claims) => claims,
            Err(_) => {
                tracing::warn!(
                    token_fp = %token_tag(&token),
                    path = %path,
                    "Rejected non-access token"
                );
                return GateOutcome::Reject(AuthError::InvalidToken);
            }
        };

        let Some(role) = claims.role else {
            tracing::error!(
                token_fp = %token_tag(&token),
                path = %path,
                "Access token carries no role"
            );
            return GateOutcome::Reject(AuthError::Internal);
        };

        GateOutcome::Authenticated {
            principal: Principal::new(claims.sub, role),
            token,
        }
    }
}

/// Short fingerprint prefix; every HS256 JWT starts with the same header bytes
fn token_tag(token: &str) -> String {
    let mut fingerprint = token_fingerprint(token);
    fingerprint.truncate(LOGGED_FINGERPRINT_LEN);
    fingerprint
}
