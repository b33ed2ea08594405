//! Login origin of an account
//!
//! An account's origin is fixed at creation. `None` marks a local
//! password account; the others name the identity provider that
//! first vouched for the email.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Origin {
    None,
    Google,
    Naver,
}

impl Origin {
    /// Storage / wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::None => "NONE",
            Origin::Google => "GOOGLE",
            Origin::Naver => "NAVER",
        }
    }

    /// Resolve a provider path segment such as `google` in `/api/social/login/google`.
    ///
    /// `None` is not a provider and never resolves.
    pub fn from_provider_slug(slug: &str) -> Option<Self> {
        match slug.to_ascii_lowercase().as_str() {
            "google" => Some(Origin::Google),
            "naver" => Some(Origin::Naver),
            _ => None,
        }
    }

    pub fn is_social(&self) -> bool {
        !matches!(self, Origin::None)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(Origin::None),
            "GOOGLE" => Ok(Origin::Google),
            "NAVER" => Ok(Origin::Naver),
            other => Err(Error::Validation(format!("Unknown origin: {}", other))),
        }
    }
}
