//! Suppleit identity providers
//!
//! Exchanges an OAuth authorization code for a provider access token and
//! normalizes the provider's profile into an email + display name:
//! - Google and Naver adapters over reqwest
//! - Mock provider for local development and tests

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use suppleit_common::{Config, Origin};
use thiserror::Error;

pub mod google;
mod http;
pub mod mock;
pub mod naver;

#[derive(Error, Debug)]
pub enum OAuthError {
    #[error("OAuth configuration error: {0}")]
    Configuration(String),

    #[error("OAuth request error: {0}")]
    Request(String),

    #[error("OAuth response error: {0}")]
    Response(String),

    #[error("{0} did not provide an email address")]
    MissingEmail(Origin),

    #[error("Unsupported identity provider: {0}")]
    UnsupportedProvider(String),
}

impl From<OAuthError> for suppleit_common::Error {
    fn from(err: OAuthError) -> Self {
        match err {
            OAuthError::UnsupportedProvider(provider) => {
                suppleit_common::Error::NotFound(format!("Unsupported provider: {}", provider))
            }
            OAuthError::Configuration(msg) => suppleit_common::Error::Internal(msg),
            other => suppleit_common::Error::Upstream(other.to_string()),
        }
    }
}

/// Identity as reported by an external provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalProfile {
    pub email: String,
    pub display_name: String,
}

/// One external identity provider
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Origin recorded on accounts created through this provider
    fn origin(&self) -> Origin;

    /// Trade an authorization code for a provider access token
    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError>;

    /// Fetch the profile behind a provider access token
    async fn fetch_profile(&self, access_token: &str) -> Result<ExternalProfile, OAuthError>;

    /// Code exchange followed by profile fetch. Single attempt, no retry.
    async fn authenticate(&self, code: &str) -> Result<ExternalProfile, OAuthError> {
        let access_token = self.exchange_code(code).await?;
        let profile = self.fetch_profile(&access_token).await?;

        tracing::info!(
            provider = %self.origin(),
            email = %profile.email,
            "External profile resolved"
        );
        Ok(profile)
    }
}

/// Providers by origin
#[derive(Clone, Default)]
pub struct IdentityProviders {
    providers: HashMap<Origin, Arc<dyn IdentityProvider>>,
}

impl IdentityProviders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` under its own origin, replacing any previous one
    pub fn with(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.providers.insert(provider.origin(), provider);
        self
    }

    pub fn get(&self, origin: Origin) -> Option<Arc<dyn IdentityProvider>> {
        self.providers.get(&origin).cloned()
    }

    /// Resolve a route slug such as `google` or `naver`
    pub fn for_slug(&self, slug: &str) -> Result<Arc<dyn IdentityProvider>, OAuthError> {
        Origin::from_provider_slug(slug)
            .and_then(|origin| self.get(origin))
            .ok_or_else(|| OAuthError::UnsupportedProvider(slug.to_string()))
    }
}

/// Factory for the configured provider set
pub struct IdentityProviderFactory;

impl IdentityProviderFactory {
    /// `live` builds the real Google and Naver adapters; `mock` builds in-process fakes
    pub fn create(config: &Config) -> Result<IdentityProviders, OAuthError> {
        match config.oauth_provider.as_str() {
            "live" => {
                tracing::info!(
                    timeout_secs = config.oauth_http_timeout_secs,
                    "Creating live identity providers"
                );
                let client =
                    http::build_client(Duration::from_secs(config.oauth_http_timeout_secs))?;

                for (origin, credentials) in [
                    (Origin::Google, &config.google),
                    (Origin::Naver, &config.naver),
                ] {
                    if credentials.client_id.is_empty() {
                        tracing::warn!(
                            provider = %origin,
                            "No client id configured; logins through this provider will fail"
                        );
                    }
                }

                Ok(IdentityProviders::new()
                    .with(Arc::new(google::GoogleProvider::new(
                        client.clone(),
                        config.google.clone(),
                    )))
                    .with(Arc::new(naver::NaverProvider::new(
                        client,
                        config.naver.clone(),
                    ))))
            }
            "mock" => {
                tracing::info!("Creating mock identity providers");
                Ok(IdentityProviders::new()
                    .with(Arc::new(mock::MockIdentityProvider::new(Origin::Google)))
                    .with(Arc::new(mock::MockIdentityProvider::new(Origin::Naver))))
            }
            provider => Err(OAuthError::Configuration(format!(
                "Unknown OAuth provider mode: {}. Supported modes: live, mock",
                provider
            ))),
        }
    }
}
