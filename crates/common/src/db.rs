//! Shared repository error type

use crate::error::Error;
use thiserror::Error;

/// Storage-layer error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Failed to hash secret: {0}")]
    Hashing(String),
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Error::NotFound("Record not found".to_string()),
            RepositoryError::Connection(e) => Error::Database(e),
            RepositoryError::InvalidData(msg) => Error::Internal(msg),
            RepositoryError::Hashing(msg) => Error::Internal(msg),
        }
    }
}
