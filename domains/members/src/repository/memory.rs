//! In-memory member store

use chrono::Utc;
use dashmap::DashMap;
use suppleit_common::RepositoryError;

use super::MemberStore;
use crate::domain::entities::{Account, NewAccount};

#[derive(Debug, Default)]
pub struct InMemoryMemberStore {
    accounts: DashMap<String, Account>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait::async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        Ok(self.accounts.get(email).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, account: NewAccount) -> Result<bool, RepositoryError> {
        let mut created = false;
        self.accounts.entry(account.email.clone()).or_insert_with(|| {
            created = true;
            account.into_account(Utc::now())
        });
        Ok(created)
    }
}
