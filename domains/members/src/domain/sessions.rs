//! Local login, token refresh, and logout

use std::sync::Arc;

use suppleit_auth::{AuthBackend, AuthError, TokenKind, TokenPair};
use suppleit_common::verify_password;

use crate::domain::error::MembersError;
use crate::domain::reconcile::{issue_login, MemberLogin};
use crate::repository::MemberStore;

#[derive(Clone)]
pub struct SessionService {
    members: Arc<dyn MemberStore>,
    auth: AuthBackend,
}

impl SessionService {
    pub fn new(members: Arc<dyn MemberStore>, auth: AuthBackend) -> Self {
        Self { members, auth }
    }

    /// Password login. Unknown email and wrong password are indistinguishable.
    pub async fn login(&self, email: &str, password: &str) -> Result<MemberLogin, MembersError> {
        let Some(account) = self.members.find_by_email(email.trim()).await? else {
            tracing::info!(email = %email, "Login for unknown email");
            return Err(MembersError::InvalidCredentials);
        };

        if !verify_password(password, &account.password_hash) {
            tracing::info!(email = %email, "Login with wrong password");
            return Err(MembersError::InvalidCredentials);
        }

        issue_login(&self.auth, &account)
    }

    /// Mint a new access token from a refresh token.
    ///
    /// The role comes from the current account, not the old token. The same
    /// refresh token is handed back; it is not rotated.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, MembersError> {
        if self.auth.is_revoked(refresh_token).await? {
            tracing::info!("Refresh with revoked token");
            return Err(MembersError::Auth(AuthError::TokenRevoked));
        }

        let claims = self
            .auth
            .codec()
            .decode(refresh_token, TokenKind::Refresh)
            .map_err(|_| MembersError::InvalidRefreshToken)?;

        let account = self
            .members
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::warn!(email = %claims.sub, "Refresh token for missing member");
                MembersError::InvalidRefreshToken
            })?;

        let access_token = self
            .auth
            .codec()
            .issue_access_token(&account.email, account.role)?;

        Ok(TokenPair {
            access_token,
            refresh_token: refresh_token.to_string(),
        })
    }

    /// Revoke the presented token until its natural expiry
    pub async fn logout(&self, token: &str) -> Result<(), MembersError> {
        self.auth.revoke(token).await?;
        Ok(())
    }
}
