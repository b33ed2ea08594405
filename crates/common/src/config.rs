//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use std::env;
use std::fmt;
use std::str::FromStr;

const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;
const DEFAULT_REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;
/// Ten years
const MAX_TOKEN_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// OAuth client registration for a single identity provider
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

#[derive(Clone)]
pub struct Config {
    /// HMAC secret used to sign bearer tokens
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,

    /// Identity providers
    pub google: ProviderCredentials,
    pub naver: ProviderCredentials,
    /// `live` talks to the real providers, `mock` uses in-process fakes
    pub oauth_provider: String,
    pub oauth_http_timeout_secs: u64,

    /// Member store; in-memory when unset
    pub database_url: Option<String>,

    /// Interval between sweeps of expired revocation entries
    pub revocation_sweep_secs: u64,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("jwt_secret", &"[redacted]")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .field("refresh_token_ttl_secs", &self.refresh_token_ttl_secs)
            .field("google", &self.google)
            .field("naver", &self.naver)
            .field("oauth_provider", &self.oauth_provider)
            .field("oauth_http_timeout_secs", &self.oauth_http_timeout_secs)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("revocation_sweep_secs", &self.revocation_sweep_secs)
            .field("rust_log", &self.rust_log)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET is required"))?;

        let access_token_ttl_secs =
            parse_or(&lookup, "ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TOKEN_TTL_SECS)?;
        let refresh_token_ttl_secs = parse_or(
            &lookup,
            "REFRESH_TOKEN_TTL_SECS",
            DEFAULT_REFRESH_TOKEN_TTL_SECS,
        )?;

        if access_token_ttl_secs <= 0 || refresh_token_ttl_secs <= 0 {
            anyhow::bail!("Token TTLs must be positive");
        }
        if access_token_ttl_secs > MAX_TOKEN_TTL_SECS
            || refresh_token_ttl_secs > MAX_TOKEN_TTL_SECS
        {
            anyhow::bail!("Token TTLs must not exceed {} seconds", MAX_TOKEN_TTL_SECS);
        }
        if refresh_token_ttl_secs < access_token_ttl_secs {
            tracing::warn!(
                access_token_ttl_secs,
                refresh_token_ttl_secs,
                "Refresh token TTL is shorter than access token TTL"
            );
        }

        let oauth_provider = lookup("OAUTH_PROVIDER").unwrap_or_else(|| "live".to_string());

        let config = Self {
            jwt_secret,
            jwt_issuer: lookup("JWT_ISSUER").filter(|s| !s.is_empty()),
            access_token_ttl_secs,
            refresh_token_ttl_secs,

            google: ProviderCredentials {
                client_id: lookup("GOOGLE_CLIENT_ID").unwrap_or_default(),
                client_secret: lookup("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
                redirect_uri: lookup("GOOGLE_REDIRECT_URI")
                    .unwrap_or_else(|| "http://localhost:3000/callback/google".to_string()),
            },
            naver: ProviderCredentials {
                client_id: lookup("NAVER_CLIENT_ID").unwrap_or_default(),
                client_secret: lookup("NAVER_CLIENT_SECRET").unwrap_or_default(),
                redirect_uri: lookup("NAVER_REDIRECT_URI")
                    .unwrap_or_else(|| "http://localhost:3000/callback/naver".to_string()),
            },
            oauth_provider,
            oauth_http_timeout_secs: parse_or(&lookup, "OAUTH_HTTP_TIMEOUT_SECS", 10)?,

            database_url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),

            revocation_sweep_secs: parse_or(&lookup, "REVOCATION_SWEEP_SECS", 60)?,

            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "suppleit=debug".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
        };

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
        None => Ok(default),
    }
}
