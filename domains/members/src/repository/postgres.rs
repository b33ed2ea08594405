//! Postgres member repository
//!
//! Runtime `sqlx::query_as` against the `members` table (see `migrations/`).

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use suppleit_auth::Role;
use suppleit_common::{Origin, RepositoryError};

use super::MemberStore;
use crate::domain::entities::{Account, NewAccount};

#[derive(sqlx::FromRow)]
struct MemberRow {
    email: String,
    password_hash: String,
    display_name: String,
    role: String,
    social_type: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(RepositoryError::InvalidData)?;
        let origin: Origin = row
            .social_type
            .parse()
            .map_err(|e: suppleit_common::Error| RepositoryError::InvalidData(e.to_string()))?;

        Ok(Account {
            email: row.email,
            password_hash: row.password_hash,
            display_name: row.display_name,
            role,
            origin,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MemberStore for PgMemberRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
            SELECT email, password_hash, display_name, role, social_type, created_at
            FROM members
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, email = %email, "Failed to load member");
            RepositoryError::Connection(e)
        })?;

        row.map(Account::try_from).transpose()
    }

    async fn insert(&self, account: NewAccount) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO members (email, password_hash, display_name, role, social_type)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.display_name)
        .bind(account.role.as_str())
        .bind(account.origin.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, email = %account.email, "Failed to insert member");
            RepositoryError::Connection(e)
        })?;

        Ok(result.rows_affected() == 1)
    }
}
