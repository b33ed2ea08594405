//! Mock Identity Provider
//!
//! Used by `IdentityProviderFactory` when the mode is `"mock"`. Resolves
//! codes without any network traffic:
//! - a code registered with `with_profile` returns that profile
//! - a code registered with `with_failure` fails like an upstream error
//! - a code containing `@` is taken as the email itself
//! - any other code becomes `<code>@<provider>.mock`

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use suppleit_common::Origin;

use crate::{ExternalProfile, IdentityProvider, OAuthError};

const TOKEN_PREFIX: &str = "mock-token:";

#[derive(Default)]
struct Programmed {
    profiles: HashMap<String, ExternalProfile>,
    failures: HashSet<String>,
}

#[derive(Clone)]
pub struct MockIdentityProvider {
    origin: Origin,
    programmed: Arc<Mutex<Programmed>>,
}

impl MockIdentityProvider {
    pub fn new(origin: Origin) -> Self {
        Self {
            origin,
            programmed: Arc::new(Mutex::new(Programmed::default())),
        }
    }

    pub fn with_profile(self, code: impl Into<String>, profile: ExternalProfile) -> Self {
        if let Ok(mut programmed) = self.programmed.lock() {
            programmed.profiles.insert(code.into(), profile);
        }
        self
    }

    pub fn with_failure(self, code: impl Into<String>) -> Self {
        if let Ok(mut programmed) = self.programmed.lock() {
            programmed.failures.insert(code.into());
        }
        self
    }

    fn default_profile(&self, code: &str) -> ExternalProfile {
        if code.contains('@') {
            let display_name = code.split('@').next().unwrap_or(code).to_string();
            return ExternalProfile {
                email: code.to_string(),
                display_name,
            };
        }

        ExternalProfile {
            email: format!("{}@{}.mock", code, self.origin.as_str().to_lowercase()),
            display_name: format!("Mock {} User", self.origin),
        }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MockIdentityProvider {
    fn origin(&self) -> Origin {
        self.origin
    }

    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        let failing = self
            .programmed
            .lock()
            .map(|p| p.failures.contains(code))
            .unwrap_or(false);

        if failing || code.trim().is_empty() {
            tracing::info!(provider = %self.origin, "Mock provider rejecting code");
            return Err(OAuthError::Response(format!(
                "Mock {} rejected authorization code",
                self.origin
            )));
        }

        Ok(format!("{}{}", TOKEN_PREFIX, code))
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<ExternalProfile, OAuthError> {
        let code = access_token
            .strip_prefix(TOKEN_PREFIX)
            .ok_or_else(|| OAuthError::Response("Unknown mock access token".to_string()))?;

        let programmed = self
            .programmed
            .lock()
            .ok()
            .and_then(|p| p.profiles.get(code).cloned());

        let profile = programmed.unwrap_or_else(|| self.default_profile(code));
        if profile.email.trim().is_empty() {
            return Err(OAuthError::MissingEmail(self.origin));
        }

        Ok(profile)
    }
}
