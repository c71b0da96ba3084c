use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Input form failed validation or conversion.
    #[error("invalid form input: {0}")]
    Form(String),
    /// A domain type constraint was violated.
    #[error("type constraint violated: {0}")]
    TypeConstraint(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
