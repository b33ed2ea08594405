//! Members domain: accounts, identity reconciliation, login/logout/refresh

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Account, AccountSummary, NewAccount};
pub use domain::error::MembersError;
pub use domain::reconcile::{IdentityReconciler, MemberLogin, SocialLogin};
pub use domain::sessions::SessionService;

// Re-export repository types
pub use repository::{InMemoryMemberStore, MemberStore, PgMemberRepository};

// Re-export API types
pub use api::routes;
pub use api::MembersState;
