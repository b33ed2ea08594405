//! Shared utilities, configuration, and error handling for the Suppleit gateway
//!
//! - Configuration management following 12-factor principles
//! - Error types and HTTP rendering
//! - Password hashing and token fingerprints
//! - Login origin shared by accounts and identity providers

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod extractors;
pub mod origin;

pub use config::{Config, ProviderCredentials};
pub use crypto::{hash_password, token_fingerprint, verify_password, PasswordHashError};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
pub use origin::Origin;
