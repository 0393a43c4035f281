use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;

pub mod auth;
pub mod products;
pub mod wishlist;

pub const HX_REQUEST: &str = "HX-Request";
pub const HX_CURRENT_URL: &str = "HX-Current-URL";
pub const HX_REDIRECT: &str = "HX-Redirect";

pub const LOGIN_URL: &str = "/accounts/login";

/// Register every application route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(products::product_list)
        .service(wishlist::show_wishlist)
        .service(wishlist::add_to_wishlist)
        .service(wishlist::remove_from_wishlist)
        .service(wishlist::add_to_wishlist_get)
        .service(wishlist::remove_from_wishlist_get)
        .service(auth::signup_page)
        .service(auth::signup)
        .service(auth::login_page)
        .service(auth::login)
        .service(auth::logout);
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Bootstrap alert class for a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info => "info",
        Level::Debug => "secondary",
    }
}

pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert("signed_in", &user.is_some());
    context.insert("current_page", current_page);
    context
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn is_htmx(req: &HttpRequest) -> bool {
    req.headers().contains_key(HX_REQUEST)
}

/// `HX-Current-URL` sent by htmx, i.e. the page the request was made from.
pub fn htmx_current_url(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(HX_CURRENT_URL)
        .and_then(|v| v.to_str().ok())
}

/// Local path (with query) the visitor should return to after signing in.
fn return_path(req: &HttpRequest) -> String {
    if let Some(current) = htmx_current_url(req) {
        if let Ok(url) = url::Url::parse(current) {
            return match url.query() {
                Some(query) => format!("{}?{query}", url.path()),
                None => url.path().to_string(),
            };
        }
    }
    if req.method() == actix_web::http::Method::GET {
        req.uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string())
    } else {
        "/".to_string()
    }
}

/// Send an anonymous visitor to the login page.
///
/// htmx requests get an `HX-Redirect` header so the whole page navigates
/// instead of swapping the login form into a fragment.
pub fn login_required(req: &HttpRequest) -> HttpResponse {
    let location = format!(
        "{LOGIN_URL}?next={}",
        urlencoding::encode(&return_path(req))
    );
    if is_htmx(req) {
        HttpResponse::Unauthorized()
            .insert_header((HX_REDIRECT, location))
            .finish()
    } else {
        redirect(&location)
    }
}

pub fn not_found(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
) -> HttpResponse {
    let context = base_context(flash_messages, user, "not_found");
    match tera.render("errors/404.html", &context) {
        Ok(body) => HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render 404 page: {e}");
            HttpResponse::NotFound().finish()
        }
    }
}

/// Fallback for unmatched paths.
pub async fn page_not_found(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> HttpResponse {
    not_found(&tera, &flash_messages, user.as_ref())
}
