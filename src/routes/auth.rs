use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::FormErrors;
use crate::forms::auth::{
    LoginForm, LoginPayload, SignupForm, SignupPayload, invalid_login, sanitize_next,
};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth::{authenticate, register};

#[derive(Deserialize)]
struct LoginQueryParams {
    next: Option<String>,
}

fn render_signup(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    errors: &FormErrors,
    username: &str,
) -> HttpResponse {
    let mut context = base_context(flash_messages, user, "signup");
    context.insert("errors", errors);
    context.insert("username", username);
    render_template(tera, "accounts/signup.html", &context)
}

fn render_login(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    errors: &FormErrors,
    username: &str,
    next: Option<&str>,
) -> HttpResponse {
    let mut context = base_context(flash_messages, user, "login");
    context.insert("errors", errors);
    context.insert("username", username);
    context.insert("next", &next);
    render_template(tera, "accounts/login.html", &context)
}

/// Attach the user to the session cookie.
fn sign_in(req: &HttpRequest, user: &AuthenticatedUser) -> Result<(), HttpResponse> {
    Identity::login(&req.extensions(), user.id.to_string()).map_err(|e| {
        log::error!("Failed to start session for user {}: {e}", user.id);
        HttpResponse::InternalServerError().finish()
    })?;
    Ok(())
}

#[get("/accounts/signup")]
pub async fn signup_page(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_signup(&tera, &flash_messages, user.as_ref(), &FormErrors::new(), "")
}

#[post("/accounts/signup")]
pub async fn signup(
    req: HttpRequest,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<SignupForm>,
) -> impl Responder {
    let username = form.username.trim().to_string();

    let payload: SignupPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(errors) => {
            return render_signup(&tera, &flash_messages, user.as_ref(), &errors, &username);
        }
    };

    match register(payload, repo.get_ref()) {
        Ok(registered) => {
            if let Err(response) = sign_in(&req, &registered) {
                return response;
            }
            FlashMessage::success("Account created successfully!").send();
            redirect("/")
        }
        Err(ServiceError::Validation(errors)) => {
            render_signup(&tera, &flash_messages, user.as_ref(), &errors, &username)
        }
        Err(err) => {
            log::error!("Failed to register user: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/accounts/login")]
pub async fn login_page(
    params: web::Query<LoginQueryParams>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let next = sanitize_next(params.into_inner().next);
    render_login(
        &tera,
        &flash_messages,
        user.as_ref(),
        &FormErrors::new(),
        "",
        next.as_deref(),
    )
}

#[post("/accounts/login")]
pub async fn login(
    req: HttpRequest,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let username = form.username.trim().to_string();
    let next = sanitize_next(form.next.clone());

    let payload: LoginPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(errors) => {
            return render_login(
                &tera,
                &flash_messages,
                user.as_ref(),
                &errors,
                &username,
                next.as_deref(),
            );
        }
    };

    match authenticate(&payload, repo.get_ref()) {
        Ok(authenticated) => {
            if let Err(response) = sign_in(&req, &authenticated) {
                return response;
            }
            redirect(payload.next.as_deref().unwrap_or("/"))
        }
        Err(ServiceError::InvalidCredentials) => render_login(
            &tera,
            &flash_messages,
            user.as_ref(),
            &invalid_login(),
            &username,
            next.as_deref(),
        ),
        Err(err) => {
            log::error!("Failed to authenticate user: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/accounts/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect("/")
}
