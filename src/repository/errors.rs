use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Failed to obtain a connection from the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    /// A stored value violated a domain constraint.
    #[error("validation error: {0}")]
    Validation(String),
    /// Requested record does not exist.
    #[error("not found")]
    NotFound,
}

/// Convenient alias for results returned from repository methods.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
