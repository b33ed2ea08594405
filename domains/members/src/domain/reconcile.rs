//! Identity reconciliation
//!
//! Maps an external identity (email, display name, origin) onto exactly one
//! local account. An email first registered through one provider cannot be
//! taken over through another; local accounts (`Origin::None`) accept any
//! provider.

use std::sync::Arc;

use serde::Serialize;
use suppleit_auth::AuthBackend;
use suppleit_common::{Origin, RepositoryError};
use suppleit_oauth::OAuthError;

use crate::domain::entities::{Account, AccountSummary, NewAccount};
use crate::domain::error::MembersError;
use crate::repository::MemberStore;

/// Token pair plus the member it was issued for
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberLogin {
    pub access_token: String,
    pub refresh_token: String,
    pub member: AccountSummary,
}

/// Result of a social login
pub type SocialLogin = MemberLogin;

#[derive(Clone)]
pub struct IdentityReconciler {
    members: Arc<dyn MemberStore>,
    auth: AuthBackend,
}

impl IdentityReconciler {
    pub fn new(members: Arc<dyn MemberStore>, auth: AuthBackend) -> Self {
        Self { members, auth }
    }

    pub async fn reconcile(
        &self,
        email: &str,
        display_name: &str,
        origin: Origin,
    ) -> Result<SocialLogin, MembersError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(MembersError::Upstream(OAuthError::MissingEmail(origin)));
        }

        let account = match self.members.find_by_email(email).await? {
            Some(existing) => {
                ensure_same_origin(&existing, origin)?;
                tracing::info!(email = %email, origin = %origin, "Existing member signed in");
                existing
            }
            None => self.create(email, display_name, origin).await?,
        };

        issue_login(&self.auth, &account)
    }

    async fn create(
        &self,
        email: &str,
        display_name: &str,
        origin: Origin,
    ) -> Result<Account, MembersError> {
        let created = self
            .members
            .insert(NewAccount::social(email, display_name, origin)?)
            .await?;

        // The stored row is authoritative: a concurrent creator may have won the insert
        let account = self
            .members
            .find_by_email(email)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        ensure_same_origin(&account, origin)?;

        if created {
            tracing::info!(email = %email, origin = %origin, "Member created from social login");
        } else {
            tracing::info!(email = %email, origin = %origin, "Member created concurrently; reusing it");
        }

        Ok(account)
    }
}

fn ensure_same_origin(account: &Account, origin: Origin) -> Result<(), MembersError> {
    if account.origin != Origin::None && account.origin != origin {
        tracing::warn!(
            email = %account.email,
            existing = %account.origin,
            attempted = %origin,
            "Social login conflicts with existing account origin"
        );
        return Err(MembersError::IdentityConflict {
            existing: account.origin,
        });
    }
    Ok(())
}

pub(crate) fn issue_login(auth: &AuthBackend, account: &Account) -> Result<MemberLogin, MembersError> {
    let pair = auth.issue_pair(&account.email, account.role)?;
    Ok(MemberLogin {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        member: account.summary(),
    })
}
