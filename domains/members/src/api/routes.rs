//! Route definitions for Members domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{auth, social};
use super::middleware::MembersState;

/// Login, refresh, and logout routes
fn session_routes() -> Router<MembersState> {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/logout", post(auth::logout))
}

fn social_routes() -> Router<MembersState> {
    Router::new().route("/api/social/login/{provider}", post(social::social_login))
}

fn member_routes() -> Router<MembersState> {
    Router::new().route("/api/member/auth/me", get(auth::me))
}

/// Create all Members domain routes
pub fn routes() -> Router<MembersState> {
    Router::new()
        .merge(session_routes())
        .merge(social_routes())
        .merge(member_routes())
}
