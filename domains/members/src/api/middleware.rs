//! Members domain state and auth backend integration

use std::sync::Arc;

use axum::extract::FromRef;
use suppleit_auth::AuthBackend;
use suppleit_oauth::IdentityProviders;

use crate::domain::reconcile::IdentityReconciler;
use crate::domain::sessions::SessionService;
use crate::repository::MemberStore;

/// Application state for the Members domain
#[derive(Clone)]
pub struct MembersState {
    pub auth: AuthBackend,
    pub providers: IdentityProviders,
    pub reconciler: IdentityReconciler,
    pub sessions: SessionService,
}

impl MembersState {
    pub fn new(
        members: Arc<dyn MemberStore>,
        auth: AuthBackend,
        providers: IdentityProviders,
    ) -> Self {
        Self {
            reconciler: IdentityReconciler::new(members.clone(), auth.clone()),
            sessions: SessionService::new(members, auth.clone()),
            auth,
            providers,
        }
    }
}

impl FromRef<MembersState> for AuthBackend {
    fn from_ref(state: &MembersState) -> Self {
        state.auth.clone()
    }
}
