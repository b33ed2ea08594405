//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A protected route was reached without an authenticated principal
    #[error("authentication required")]
    MissingAuthorization,
    #[error("authorization header is not valid visible ASCII")]
    MalformedHeader,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("token has been revoked")]
    TokenRevoked,
    #[error("principal lacks the role required for this route")]
    InsufficientRole,
    #[error("failed to issue token: {0}")]
    TokenIssue(String),
    /// Unexpected fault while authenticating a request; detail stays in the logs
    #[error("internal authentication fault")]
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingAuthorization => (
                StatusCode::UNAUTHORIZED,
                "MISSING_AUTHORIZATION",
                "Authentication required",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or expired token",
            ),
            AuthError::TokenRevoked => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_REVOKED",
                "Token has been invalidated (logged out)",
            ),
            AuthError::MalformedHeader | AuthError::Internal => (
                StatusCode::UNAUTHORIZED,
                "AUTH_ERROR",
                "Authentication error",
            ),
            AuthError::InsufficientRole => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Insufficient role for this resource",
            ),
            AuthError::TokenIssue(ref detail) => {
                tracing::error!(error = %detail, "Token issuance failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TOKEN_ISSUE_ERROR",
                    "Failed to issue token",
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_codes() {
        let cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::MissingAuthorization, StatusCode::UNAUTHORIZED),
            (AuthError::MalformedHeader, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AuthError::TokenRevoked, StatusCode::UNAUTHORIZED),
            (AuthError::Internal, StatusCode::UNAUTHORIZED),
            (AuthError::InsufficientRole, StatusCode::FORBIDDEN),
            (
                AuthError::TokenIssue("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[tokio::test]
    async fn test_revoked_and_invalid_are_distinguishable() {
        let revoked = AuthError::TokenRevoked.into_response();
        let bytes = axum::body::to_bytes(revoked.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "TOKEN_REVOKED");
        assert_eq!(
            body["error"]["message"],
            "Token has been invalidated (logged out)"
        );

        let invalid = AuthError::InvalidToken.into_response();
        let bytes = axum::body::to_bytes(invalid.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    }
}
