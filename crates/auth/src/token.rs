//! Token codec and bearer extraction
//!
//! Access and refresh tokens are HS256 JWTs signed with the process-wide
//! secret. Validation fails closed: every parse, signature, algorithm, or
//! expiry problem comes back as a non-valid [`TokenValidation`], never a
//! panic.

use axum::http::HeaderValue;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use uuid::Uuid;

use crate::claims::TokenClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::types::{Role, TokenKind};

const BEARER_PREFIX: &str = "Bearer ";

/// Outcome of checking a token's signature and lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenValidation {
    Valid,
    Expired,
    BadSignature,
    Malformed,
}

impl TokenValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenValidation::Valid)
    }

    pub fn reason(&self) -> &'static str {
        match self {
            TokenValidation::Valid => "valid",
            TokenValidation::Expired => "expired",
            TokenValidation::BadSignature => "bad signature",
            TokenValidation::Malformed => "malformed",
        }
    }
}

/// Freshly issued access + refresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and parses signed, expiring bearer tokens
pub struct TokenCodec {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
}

impl TokenCodec {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
            header: Header::new(Algorithm::HS256),
        }
    }

    /// Short-lived token carrying subject and role
    pub fn issue_access_token(&self, email: &str, role: Role) -> Result<String, AuthError> {
        self.issue(email, Some(role), TokenKind::Access, Utc::now())
    }

    /// Long-lived token carrying only the subject
    pub fn issue_refresh_token(&self, email: &str) -> Result<String, AuthError> {
        self.issue(email, None, TokenKind::Refresh, Utc::now())
    }

    pub fn issue_pair(&self, email: &str, role: Role) -> Result<TokenPair, AuthError> {
        let now = Utc::now();
        Ok(TokenPair {
            access_token: self.issue(email, Some(role), TokenKind::Access, now)?,
            refresh_token: self.issue(email, None, TokenKind::Refresh, now)?,
        })
    }

    pub(crate) fn issue(
        &self,
        email: &str,
        role: Option<Role>,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let ttl = match kind {
            TokenKind::Access => self.config.access_ttl,
            TokenKind::Refresh => self.config.refresh_ttl,
        };
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::TokenIssue(format!("token lifetime {} overflows", ttl)))?;

        let claims = TokenClaims {
            sub: email.to_string(),
            role,
            kind,
            iat: now.timestamp().max(0) as u64,
            exp: expires_at.timestamp().max(0) as u64,
            iss: self.config.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        self.sign(&claims)
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        encode(&self.header, claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenIssue(e.to_string()))
    }

    /// Check signature and expiry against the current time
    pub fn validate(&self, token: &str) -> TokenValidation {
        self.validate_at(token, Utc::now())
    }

    /// Check signature and expiry against `now`. A token is expired at `exp` itself.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> TokenValidation {
        match self.verify(token, now) {
            Ok(_) => TokenValidation::Valid,
            Err(reason) => reason,
        }
    }

    /// Validated decode that also pins the token kind
    pub fn decode(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, AuthError> {
        let claims = self.verify(token, Utc::now()).map_err(|reason| {
            tracing::debug!(reason = reason.reason(), "Token rejected");
            AuthError::InvalidToken
        })?;

        if claims.kind != expected {
            tracing::debug!(
                expected = ?expected,
                actual = ?claims.kind,
                "Token kind mismatch"
            );
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }

    /// Subject of a token that has already passed `validate`
    pub fn get_email(&self, token: &str) -> Result<String, AuthError> {
        self.verify(token, Utc::now())
            .map(|claims| claims.sub)
            .map_err(|_| AuthError::InvalidToken)
    }

    /// Role of an access token that has already passed `validate`
    pub fn get_role(&self, token: &str) -> Result<Role, AuthError> {
        self.verify(token, Utc::now())
            .map_err(|_| AuthError::InvalidToken)?
            .role
            .ok_or(AuthError::InvalidToken)
    }

    /// Natural expiry of a currently valid token; `None` when it is already dead
    pub fn expires_at(&self, token: &str) -> Option<DateTime<Utc>> {
        let claims = self.verify(token, Utc::now()).ok()?;
        DateTime::from_timestamp(claims.exp as i64, 0)
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenValidation> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        match &self.config.issuer {
            Some(iss) => {
                // jsonwebtoken only compares `iss` when the claim is present
                validation.set_required_spec_claims(&["exp", "sub", "iss"]);
                validation.set_issuer(&[iss]);
            }
            None => validation.set_required_spec_claims(&["exp", "sub"]),
        }

        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenValidation::Expired,
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        TokenValidation::BadSignature
                    }
                    _ => TokenValidation::Malformed,
                }
            })?;

        // jsonwebtoken accepts exp == now; the gate treats that instant as expired
        if now.timestamp() >= token_data.claims.exp as i64 {
            return Err(TokenValidation::Expired);
        }

        Ok(token_data.claims)
    }
}

/// Extract the bearer token from an Authorization header.
///
/// - no header, another scheme, or an empty token → `Ok(None)`
/// - `Bearer ` followed by bytes that are not visible ASCII → `Err(MalformedHeader)`
pub fn extract_bearer_token(header: Option<&HeaderValue>) -> Result<Option<String>, AuthError> {
    let Some(header) = header else {
        return Ok(None);
    };

    if !header.as_bytes().starts_with(BEARER_PREFIX.as_bytes()) {
        return Ok(None);
    }

    let header_str = header.to_str().map_err(|_| AuthError::MalformedHeader)?;
    let token = header_str[BEARER_PREFIX.len()..].trim();

    if token.is_empty() {
        return Ok(None);
    }

    Ok(Some(token.to_string()))
}
