use thiserror::Error;

use crate::forms::FormErrors;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The operation requires a signed-in user.
    #[error("authentication required")]
    Unauthenticated,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Submitted input failed validation.
    #[error("validation failed: {0}")]
    Validation(FormErrors),
    /// Username/password pair did not match an account.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
