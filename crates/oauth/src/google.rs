//! Google OAuth adapter
//!
//! Token endpoint `https://oauth2.googleapis.com/token`, profile from the
//! OpenID userinfo endpoint.

use reqwest::Client;
use serde::Deserialize;
use suppleit_common::{Origin, ProviderCredentials};

use crate::http::{exchange_authorization_code, fetch_profile_json, non_blank};
use crate::{ExternalProfile, IdentityProvider, OAuthError};

const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_PROFILE_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";
const DEFAULT_DISPLAY_NAME: &str = "Google User";

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: Option<String>,
    name: Option<String>,
}

pub struct GoogleProvider {
    client: Client,
    credentials: ProviderCredentials,
    token_url: String,
    profile_url: String,
}

impl GoogleProvider {
    pub fn new(client: Client, credentials: ProviderCredentials) -> Self {
        Self {
            client,
            credentials,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            profile_url: DEFAULT_PROFILE_URL.to_string(),
        }
    }

    /// Point the adapter at other endpoints (local stubs)
    pub fn with_endpoints(mut self, token_url: impl Into<String>, profile_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self.profile_url = profile_url.into();
        self
    }
}

#[async_trait::async_trait]
impl IdentityProvider for GoogleProvider {
    fn origin(&self) -> Origin {
        Origin::Google
    }

    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        tracing::debug!("Exchanging Google authorization code");
        exchange_authorization_code(&self.client, &self.token_url, &self.credentials, code).await
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<ExternalProfile, OAuthError> {
        let info: UserInfo =
            fetch_profile_json(&self.client, &self.profile_url, access_token).await?;

        let email = non_blank(info.email).ok_or(OAuthError::MissingEmail(Origin::Google))?;
        let display_name =
            non_blank(info.name).unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

        Ok(ExternalProfile {
            email,
            display_name,
        })
    }
}
