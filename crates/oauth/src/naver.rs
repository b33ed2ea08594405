//! Naver OAuth adapter
//!
//! Naver wraps the profile in a `response` object and prefers `nickname`
//! over `name` for display.

use reqwest::Client;
use serde::Deserialize;
use suppleit_common::{Origin, ProviderCredentials};

use crate::http::{exchange_authorization_code, fetch_profile_json, non_blank};
use crate::{ExternalProfile, IdentityProvider, OAuthError};

const DEFAULT_TOKEN_URL: &str = "https://nid.naver.com/oauth2.0/token";
const DEFAULT_PROFILE_URL: &str = "https://openapi.naver.com/v1/nid/me";
const DEFAULT_DISPLAY_NAME: &str = "Naver User";

#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    response: Option<NaverProfile>,
}

#[derive(Debug, Deserialize)]
struct NaverProfile {
    email: Option<String>,
    nickname: Option<String>,
    name: Option<String>,
}

pub struct NaverProvider {
    client: Client,
    credentials: ProviderCredentials,
    token_url: String,
    profile_url: String,
}

impl NaverProvider {
    pub fn new(client: Client, credentials: ProviderCredentials) -> Self {
        Self {
            client,
            credentials,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            profile_url: DEFAULT_PROFILE_URL.to_string(),
        }
    }

    pub fn with_endpoints(mut self, token_url: impl Into<String>, profile_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self.profile_url = profile_url.into();
        self
    }
}

#[async_trait::async_trait]
impl IdentityProvider for NaverProvider {
    fn origin(&self) -> Origin {
        Origin::Naver
    }

    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        tracing::debug!("Exchanging Naver authorization code");
        exchange_authorization_code(&self.client, &self.token_url, &self.credentials, code).await
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<ExternalProfile, OAuthError> {
        let envelope: ProfileEnvelope =
            fetch_profile_json(&self.client, &self.profile_url, access_token).await?;

        let profile = envelope.response.ok_or_else(|| {
            OAuthError::Response("Naver profile has no response object".to_string())
        })?;

        let email = non_blank(profile.email).ok_or(OAuthError::MissingEmail(Origin::Naver))?;
        let display_name = non_blank(profile.nickname)
            .or_else(|| non_blank(profile.name))
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

        Ok(ExternalProfile {
            email,
            display_name,
        })
    }
}
