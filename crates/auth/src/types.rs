//! Roles, token kinds, and the per-request principal

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Member role carried in access tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Access tokens ride on every request; refresh tokens only mint new access tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// The authenticated caller for one request.
///
/// Built from access-token claims by the request gate and stored in the
/// request extensions; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}
