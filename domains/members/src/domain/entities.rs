//! Member account entities

use chrono::{DateTime, Utc};
use serde::Serialize;
use suppleit_auth::Role;
use suppleit_common::{hash_password, Origin, RepositoryError};
use uuid::Uuid;

/// Stored member account. One per email.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub email: String,
    /// Argon2 PHC string; social-only accounts hold the hash of a random value
    pub password_hash: String,
    pub display_name: String,
    pub role: Role,
    /// Channel the account was first created through; never changes
    pub origin: Origin,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn summary(&self) -> AccountSummary {
        AccountSummary::from(self)
    }
}

/// Account about to be inserted
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: Role,
    pub origin: Origin,
}

impl NewAccount {
    /// USER account for a first social login, with a password nobody knows
    pub fn social(
        email: &str,
        display_name: &str,
        origin: Origin,
    ) -> Result<Self, RepositoryError> {
        let throwaway = Uuid::new_v4().to_string();
        let password_hash =
            hash_password(&throwaway).map_err(|e| RepositoryError::Hashing(e.to_string()))?;

        Ok(Self {
            email: email.to_string(),
            password_hash,
            display_name: display_name.to_string(),
            role: Role::User,
            origin,
        })
    }

    /// Account that logs in with a password
    pub fn local(
        email: &str,
        password: &str,
        display_name: &str,
        role: Role,
    ) -> Result<Self, RepositoryError> {
        let password_hash =
            hash_password(password).map_err(|e| RepositoryError::Hashing(e.to_string()))?;

        Ok(Self {
            email: email.to_string(),
            password_hash,
            display_name: display_name.to_string(),
            role,
            origin: Origin::None,
        })
    }

    pub fn into_account(self, created_at: DateTime<Utc>) -> Account {
        Account {
            email: self.email,
            password_hash: self.password_hash,
            display_name: self.display_name,
            role: self.role,
            origin: self.origin,
            created_at,
        }
    }
}

/// Account as returned to clients; never carries the password hash
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub origin: Origin,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            role: account.role,
            origin: account.origin,
            created_at: account.created_at,
        }
    }
}
