use thiserror::Error;

/// Failures reported by repository implementations.
///
/// None of these leave the repository in a modified state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Input was rejected before any mutation.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// The operation would break a registry invariant.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
