//! Error conversion glue between the form, domain and service layers.
//!
//! The domain layer must not depend on service error types, so the
//! conversions live here and are only compiled with the `server` feature.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormErrors;
use crate::services::ServiceError;

impl From<FormErrors> for ServiceError {
    fn from(val: FormErrors) -> Self {
        ServiceError::Validation(val)
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Validation(val.into())
    }
}
