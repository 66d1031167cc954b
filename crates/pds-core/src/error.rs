//! Error taxonomy for service operations.

use pds_db::StoreError;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required field is missing or does not parse.
    #[error("{0}")]
    Validation(String),

    /// The operation's target does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    /// Any other backing-store failure.
    #[error(transparent)]
    Store(StoreError),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Store(other),
        }
    }
}

/// Parse a positive integer id from a form or query field.
pub fn parse_id(field: &str, raw: &str) -> ServiceResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ServiceError::validation(format!("{field} is required")));
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ServiceError::validation(format!("invalid {field}: {raw:?}"))),
    }
}

/// Reject an empty (or whitespace-only) required text field.
pub fn require(field: &str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(format!("{field} is required")));
    }
    Ok(())
}
