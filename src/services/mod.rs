use crate::domain::auth::AuthenticatedUser;

pub mod auth;
pub mod errors;
pub mod products;
pub mod seed;
pub mod wishlist;

pub use errors::{ServiceError, ServiceResult};

/// Guard for operations that need a signed-in user.
///
/// Returns [`ServiceError::Unauthenticated`] without touching any repository.
pub fn require_user(viewer: Option<&AuthenticatedUser>) -> ServiceResult<&AuthenticatedUser> {
    viewer.ok_or(ServiceError::Unauthenticated)
}
