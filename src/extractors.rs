//! Request extractors for the signed-in user.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{FromRequest, HttpRequest, web};

use crate::domain::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::auth::resolve_user;

fn identify(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let identity = req
        .get_identity()
        .map_err(|_| ErrorUnauthorized("not signed in"))?;
    let user_id = identity
        .id()
        .map_err(|_| ErrorUnauthorized("not signed in"))?
        .parse::<i32>()
        .map_err(|_| ErrorUnauthorized("malformed session"))?;

    let Some(repo) = req.app_data::<web::Data<DieselRepository>>() else {
        log::error!("DieselRepository is not registered as app data");
        return Err(ErrorInternalServerError("repository unavailable"));
    };

    match resolve_user(user_id, repo.get_ref()) {
        Ok(user) => Ok(user),
        Err(ServiceError::Unauthenticated) => Err(ErrorUnauthorized("unknown user")),
        Err(_) => Err(ErrorInternalServerError("failed to resolve user")),
    }
}

/// Resolves the session identity into a full user.
///
/// Handlers that serve anonymous visitors too take
/// `Option<AuthenticatedUser>`; the guard itself lives in the services.
impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(identify(req))
    }
}
