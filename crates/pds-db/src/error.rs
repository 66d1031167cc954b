//! Errors surfaced by the query layer.

use thiserror::Error;

/// Result alias for query functions.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The targeted row does not exist (or was removed by a concurrent
    /// request before this statement ran).
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: i64) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
