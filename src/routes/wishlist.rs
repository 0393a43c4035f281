use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;
use crate::dto::products::ProductView;
use crate::dto::wishlist::WishlistChange;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, htmx_current_url, login_required, not_found, redirect, render_template,
};
use crate::services::ServiceError;
use crate::services::wishlist::{
    add_to_wishlist as add_to_wishlist_service,
    remove_from_wishlist as remove_from_wishlist_service,
    show_wishlist as show_wishlist_service,
};

fn render_button(tera: &Tera, change: WishlistChange) -> HttpResponse {
    let mut context = Context::new();
    context.insert("in_wishlist", &change.in_wishlist);
    context.insert("product", &ProductView::new(change.product, change.in_wishlist));
    render_template(tera, "shop/partials/wishlist_button.html", &context)
}

#[get("/wishlist")]
pub async fn show_wishlist(
    req: HttpRequest,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_wishlist_service(user.as_ref(), repo.get_ref()) {
        Ok(items) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "wishlist");
            context.insert("wishlist_items", &items);
            render_template(&tera, "shop/wishlist.html", &context)
        }
        Err(ServiceError::Unauthenticated) => login_required(&req),
        Err(err) => {
            log::error!("Failed to render wishlist: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Returns the updated heart button for htmx to swap in.
#[post("/wishlist/add/{product_id}")]
pub async fn add_to_wishlist(
    req: HttpRequest,
    product_id: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match add_to_wishlist_service(product_id.into_inner(), user.as_ref(), repo.get_ref()) {
        Ok(change) => {
            if change.created {
                FlashMessage::success(format!("{} added to wishlist!", change.product.name))
                    .send();
            } else {
                FlashMessage::info(format!(
                    "{} is already in your wishlist.",
                    change.product.name
                ))
                .send();
            }
            render_button(&tera, change)
        }
        Err(ServiceError::Unauthenticated) => login_required(&req),
        Err(ServiceError::NotFound) => not_found(&tera, &flash_messages, user.as_ref()),
        Err(err) => {
            log::error!("Failed to add to wishlist: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// On the wishlist page the card is removed entirely; elsewhere the button
/// flips back to "add".
#[post("/wishlist/remove/{product_id}")]
pub async fn remove_from_wishlist(
    req: HttpRequest,
    product_id: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match remove_from_wishlist_service(product_id.into_inner(), user.as_ref(), repo.get_ref()) {
        Ok(change) => {
            FlashMessage::success(format!("{} removed from wishlist.", change.product.name))
                .send();
            let from_wishlist_page =
                htmx_current_url(&req).is_some_and(|url| url.contains("wishlist"));
            if from_wishlist_page {
                render_template(&tera, "shop/partials/empty.html", &Context::new())
            } else {
                render_button(&tera, change)
            }
        }
        Err(ServiceError::Unauthenticated) => login_required(&req),
        Err(ServiceError::NotFound) => not_found(&tera, &flash_messages, user.as_ref()),
        Err(err) => {
            log::error!("Failed to remove from wishlist: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Mutations are POST only. Signed-in visitors are sent home, anyone else
/// to the login page first.
fn mutation_get(req: &HttpRequest, user: Option<&AuthenticatedUser>) -> HttpResponse {
    match user {
        Some(_) => redirect("/"),
        None => login_required(req),
    }
}

#[get("/wishlist/add/{product_id}")]
pub async fn add_to_wishlist_get(
    req: HttpRequest,
    _product_id: web::Path<String>,
    user: Option<AuthenticatedUser>,
) -> impl Responder {
    mutation_get(&req, user.as_ref())
}

#[get("/wishlist/remove/{product_id}")]
pub async fn remove_from_wishlist_get(
    req: HttpRequest,
    _product_id: web::Path<String>,
    user: Option<AuthenticatedUser>,
) -> impl Responder {
    mutation_get(&req, user.as_ref())
}
