//! Social login API handler
//!
//! Implements:
//! - POST /api/social/login/{provider} - Exchange an authorization code for a token pair

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use suppleit_common::ValidatedJson;
use validator::Validate;

use crate::api::middleware::MembersState;
use crate::domain::error::MembersError;
use crate::domain::reconcile::SocialLogin;

/// Request for a social login
#[derive(Debug, Deserialize, Validate)]
pub struct SocialLoginRequest {
    #[validate(length(min = 1, max = 2048))]
    pub code: String,
}

/// POST /api/social/login/{provider}
pub async fn social_login(
    State(state): State<MembersState>,
    Path(provider): Path<String>,
    ValidatedJson(request): ValidatedJson<SocialLoginRequest>,
) -> Result<Json<SocialLogin>, MembersError> {
    let provider = state.providers.for_slug(&provider)?;
    let profile = provider.authenticate(&request.code).await?;

    let login = state
        .reconciler
        .reconcile(&profile.email, &profile.display_name, provider.origin())
        .await?;

    Ok(Json(login))
}
