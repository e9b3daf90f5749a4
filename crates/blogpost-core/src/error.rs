//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} {key}")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The requested state transition is not allowed from the current status.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl DomainError {
    pub fn post_not_found(key: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Post",
            key: key.to_string(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
