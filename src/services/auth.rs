//! Account registration, credential checks and session identity lookup.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::UserId;
use crate::domain::user::NewUser;
use crate::forms::auth::{LoginPayload, SignupPayload, duplicate_username};
use crate::repository::{RepositoryError, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Hash a password with Argon2id and a random salt, in PHC string format.
fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            log::error!("Failed to hash password: {e}");
            ServiceError::Internal
        })
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        log::warn!("Stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Create an account and return the identity to sign in as.
///
/// A taken username, compared without regard to case, is reported as a
/// validation failure on the `username` field.
pub fn register<R>(payload: SignupPayload, repo: &R) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader + UserWriter,
{
    match repo.username_taken(&payload.username) {
        Ok(true) => return Err(ServiceError::Validation(duplicate_username())),
        Ok(false) => {}
        Err(e) => {
            log::error!("Failed to check username availability: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let new_user = NewUser {
        username: payload.username,
        password_hash: hash_password(&payload.password)?,
        created_at: Utc::now().naive_utc(),
    };

    match repo.create_user(&new_user) {
        Ok(user) => {
            log::info!("Registered user {}", user.username);
            Ok(user.into())
        }
        Err(RepositoryError::ConstraintViolation(_)) => {
            Err(ServiceError::Validation(duplicate_username()))
        }
        Err(e) => {
            log::error!("Failed to create user: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Check a username/password pair.
///
/// Unknown users and wrong passwords produce the same error.
pub fn authenticate<R>(payload: &LoginPayload, repo: &R) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader,
{
    let (user, password_hash) = match repo.get_user_credentials(&payload.username) {
        Ok(Some(credentials)) => credentials,
        Ok(None) => return Err(ServiceError::InvalidCredentials),
        Err(e) => {
            log::error!("Failed to load credentials: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if verify_password(&payload.password, &password_hash) {
        Ok(user.into())
    } else {
        Err(ServiceError::InvalidCredentials)
    }
}

/// Resolve the user id stored in the session cookie.
///
/// Ids that no longer map to an account are treated as signed out.
pub fn resolve_user<R>(user_id: i32, repo: &R) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader,
{
    let user_id = UserId::new(user_id).map_err(|_| ServiceError::Unauthenticated)?;

    match repo.get_user_by_id(user_id) {
        Ok(Some(user)) => Ok(user.into()),
        Ok(None) => Err(ServiceError::Unauthenticated),
        Err(e) => {
            log::error!("Failed to resolve user {user_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
