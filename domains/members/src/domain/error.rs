//! Members domain errors

use axum::response::{IntoResponse, Response};
use suppleit_auth::AuthError;
use suppleit_common::{Error, Origin, RepositoryError};
use suppleit_oauth::OAuthError;

#[derive(Debug, thiserror::Error)]
pub enum MembersError {
    /// Email already belongs to an account created through another provider
    #[error("Email is already registered through {existing}")]
    IdentityConflict { existing: Origin },

    #[error(transparent)]
    Upstream(#[from] OAuthError),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for MembersError {
    fn into_response(self) -> Response {
        match self {
            MembersError::IdentityConflict { existing } => Error::Conflict(format!(
                "This email is already registered through another login ({})",
                existing
            ))
            .into_response(),
            MembersError::Upstream(err) => {
                tracing::warn!(error = %err, "Identity provider failure");
                Error::from(err).into_response()
            }
            MembersError::InvalidCredentials => {
                Error::Authentication("Invalid email or password".to_string()).into_response()
            }
            MembersError::InvalidRefreshToken => AuthError::InvalidToken.into_response(),
            MembersError::Auth(err) => err.into_response(),
            MembersError::Repository(err) => Error::from(err).into_response(),
        }
    }
}
