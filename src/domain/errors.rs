//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Rejected input, e.g. an unknown sort property
    #[error("Validation error: {0}")]
    Validation(String),
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}
