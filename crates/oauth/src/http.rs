//! Shared reqwest plumbing for the live adapters

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use suppleit_common::ProviderCredentials;

use crate::OAuthError;

/// Token endpoint response. Naver reports failures as 200 with `error` set.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client, OAuthError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| OAuthError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

/// POST an `authorization_code` grant and pull out the access token
pub(crate) async fn exchange_authorization_code(
    client: &Client,
    token_url: &str,
    credentials: &ProviderCredentials,
    code: &str,
) -> Result<String, OAuthError> {
    let form = [
        ("grant_type", "authorization_code"),
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("redirect_uri", credentials.redirect_uri.as_str()),
        ("code", code),
    ];

    let response = client
        .post(token_url)
        .form(&form)
        .send()
        .await
        .map_err(|e| OAuthError::Request(format!("Token request failed: {}", e)))?;

    let token: TokenResponse = read_json(response, "token").await?;

    if let Some(error) = token.error {
        return Err(OAuthError::Response(format!(
            "Token endpoint returned {}: {}",
            error,
            token.error_description.unwrap_or_default()
        )));
    }

    token
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| OAuthError::Response("Token response has no access_token".to_string()))
}

/// GET a profile document with bearer auth
pub(crate) async fn fetch_profile_json<T: DeserializeOwned>(
    client: &Client,
    profile_url: &str,
    access_token: &str,
) -> Result<T, OAuthError> {
    let response = client
        .get(profile_url)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| OAuthError::Request(format!("Profile request failed: {}", e)))?;

    read_json(response, "profile").await
}

async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<T, OAuthError> {
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        return Err(OAuthError::Response(format!(
            "{} endpoint returned {}: {}",
            what, status, body
        )));
    }

    response
        .json()
        .await
        .map_err(|e| OAuthError::Response(format!("Failed to parse {} response: {}", what, e)))
}

/// Trimmed, non-blank value
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
