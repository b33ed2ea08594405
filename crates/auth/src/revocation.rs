//! Revocation store for logged-out tokens
//!
//! Keys are token fingerprints, not raw tokens. An entry lives until the
//! token's own expiry; after that the codec rejects the token anyway, so
//! the entry can be evicted without reopening it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::error::AuthError;

/// Set of invalidated tokens, keyed by fingerprint
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record `key` as revoked until `expires_at`. Re-inserting keeps the later expiry.
    async fn insert(&self, key: &str, expires_at: DateTime<Utc>) -> Result<(), AuthError>;

    /// Whether `key` is currently revoked
    async fn contains(&self, key: &str) -> Result<bool, AuthError>;

    /// Drop entries whose expiry has passed; returns how many were removed
    async fn purge_expired(&self) -> usize;
}

/// Process-local store backed by a concurrent map
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    entries: DashMap<String, DateTime<Utc>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn contains_at(&self, key: &str, now: DateTime<Utc>) -> bool {
        // Copy the expiry out so the shard guard is released before any removal
        let expires_at = match self.entries.get(key) {
            Some(entry) => *entry.value(),
            None => return false,
        };

        if expires_at <= now {
            self.entries.remove_if(key, |_, exp| *exp <= now);
            return false;
        }

        true
    }

    fn purge_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, expires_at| *expires_at > now);
        before.saturating_sub(self.entries.len())
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn insert(&self, key: &str, expires_at: DateTime<Utc>) -> Result<(), AuthError> {
        self.entries
            .entry(key.to_string())
            .and_modify(|existing| {
                if expires_at > *existing {
                    *existing = expires_at;
                }
            })
            .or_insert(expires_at);
        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool, AuthError> {
        Ok(self.contains_at(key, Utc::now()))
    }

    async fn purge_expired(&self) -> usize {
        self.purge_at(Utc::now())
    }
}
