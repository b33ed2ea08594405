//! Request authentication for Suppleit
//!
//! Provides the token codec, the revocation store, the request gate and
//! authorization middleware, route access rules, and axum extractors for
//! the principal the gate attaches to each request.

mod backend;
mod claims;
mod config;
mod error;
mod extractors;
mod gate;
mod revocation;
mod rules;
mod token;
mod types;

pub use backend::AuthBackend;
pub use claims::TokenClaims;
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{AuthUser, BearerToken};
pub use gate::{authorize, request_gate, GateDecision, GateOutcome, PresentedToken};
pub use revocation::{InMemoryRevocationStore, RevocationStore};
pub use rules::{Access, AccessRule, RouteMatcher, RoutePolicy};
pub use token::{extract_bearer_token, TokenCodec, TokenPair, TokenValidation};
pub use types::{Principal, Role, TokenKind};
