//! Member storage
//!
//! `MemberStore` is the seam the reconciler and session service use.
//! Postgres backs it in deployment; the in-memory store serves tests and
//! local runs without `DATABASE_URL`.

mod memory;
mod postgres;

use suppleit_common::RepositoryError;

use crate::domain::entities::{Account, NewAccount};

pub use memory::InMemoryMemberStore;
pub use postgres::PgMemberRepository;

#[async_trait::async_trait]
pub trait MemberStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError>;

    /// Insert unless the email already exists. Returns whether this call created the row.
    async fn insert(&self, account: NewAccount) -> Result<bool, RepositoryError>;
}
