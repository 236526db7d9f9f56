//! Domain-level error types.

use thiserror::Error;

/// Domain errors - failures the pure core raises itself.
///
/// Persistence outcomes (absence, duplicates, aborted compound writes)
/// live in [`RepoError`]; the domain layer only rejects bad input and
/// refused gate checks.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized access")]
    Unauthorized,
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

    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// File store errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("I/O failure: {0}")]
    Io(String),
}
