//! Token claims

use serde::{Deserialize, Serialize};

use crate::types::{Role, TokenKind};

/// Claims carried by both access and refresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (member email)
    pub sub: String,
    /// Role; absent on refresh tokens so a refresh re-reads the current role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub kind: TokenKind,
    /// Issued at (unix seconds)
    pub iat: u64,
    /// Expires at (unix seconds)
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Unique token id; two tokens never share one, so revoking one never hits another
    pub jti: String,
}
