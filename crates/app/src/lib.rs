//! Suppleit application composition root
//!
//! Wires the member store, token codec, revocation store, and identity
//! providers together and wraps the domain routers in the request gate.

pub mod policy;

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use sqlx::PgPool;
use suppleit_auth::{
    authorize, request_gate, AuthBackend, AuthConfig, InMemoryRevocationStore, RevocationStore,
    TokenCodec,
};
use suppleit_common::Config;
use suppleit_members::{InMemoryMemberStore, MemberStore, MembersState, PgMemberRepository};
use suppleit_oauth::IdentityProviderFactory;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Create the main application router with all routes and middleware
pub async fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let members = member_store(config).await?;

    let auth = AuthBackend::new(
        TokenCodec::new(AuthConfig::from(config)),
        Arc::new(InMemoryRevocationStore::new()),
        policy::default_policy(),
    );

    let providers = IdentityProviderFactory::create(config)?;

    spawn_revocation_sweeper(
        auth.revocations().clone(),
        Duration::from_secs(config.revocation_sweep_secs),
    );

    Ok(compose(MembersState::new(members, auth, providers)))
}

async fn member_store(config: &Config) -> Result<Arc<dyn MemberStore>, anyhow::Error> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set; members are kept in memory");
        return Ok(Arc::new(InMemoryMemberStore::new()));
    };

    let pool = PgPool::connect(database_url).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to connect to database");
        anyhow::anyhow!("Database connection failed: {}", e)
    })?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    tracing::info!("Database connection established");
    Ok(Arc::new(PgMemberRepository::new(pool)))
}

/// Domain routes plus infrastructure routes, without the auth layers
pub fn app_routes(state: MembersState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(|| async { "Suppleit API v0.0.1-SNAPSHOT" }))
        .merge(suppleit_members::routes().with_state(state))
}

/// Wrap `router` in the request gate, then the route policy
pub fn protect(router: Router, auth: AuthBackend) -> Router {
    router
        .layer(from_fn_with_state(auth.clone(), authorize))
        .layer(from_fn_with_state(auth, request_gate))
}

pub fn compose(state: MembersState) -> Router {
    let auth = state.auth.clone();
    protect(app_routes(state), auth)
}

/// Periodically drop revocation entries whose tokens have expired anyway
pub fn spawn_revocation_sweeper(
    store: Arc<dyn RevocationStore>,
    every: Duration,
) -> JoinHandle<()> {
    let every = every.max(Duration::from_secs(1));

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let purged = store.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "Purged expired revocation entries");
            }
        }
    })
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
