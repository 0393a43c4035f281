use actix_web::{HttpRequest, HttpResponse, Responder, routes, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{base_context, is_htmx, render_template};
use crate::services::products::list_products as list_products_service;

/// Last `sort` value in the query string. Repeated keys never fail the
/// request.
fn sort_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "sort")
        .map(|(_, value)| value.into_owned())
        .last()
}

/// Path and query to come back to after signing in from this page.
fn login_next(req: &HttpRequest) -> String {
    let path = match req.query_string() {
        "" => req.path().to_string(),
        query => format!("{}?{query}", req.path()),
    };
    urlencoding::encode(&path).into_owned()
}

/// Product catalog. htmx sort requests receive only the list fragment.
#[routes]
#[get("/")]
#[get("/products")]
pub async fn product_list(
    req: HttpRequest,
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let sort = sort_param(req.query_string());
    match list_products_service(sort.as_deref(), user.as_ref(), repo.get_ref()) {
        Ok(listing) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "products");
            context.insert("products", &listing.products);
            context.insert("current_sort", listing.sort.as_str());
            context.insert("login_next", &login_next(&req));

            let template = if is_htmx(&req) {
                "shop/partials/product_list_partial.html"
            } else {
                "shop/product_list.html"
            };
            render_template(&tera, template, &context)
        }
        Err(err) => {
            log::error!("Failed to render product list: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn last_sort_value_wins() {
        assert_eq!(
            sort_param("sort=price_high&sort=bogus").as_deref(),
            Some("bogus")
        );
        assert_eq!(sort_param("page=2").as_deref(), None);
        assert_eq!(sort_param("").as_deref(), None);
    }

    #[test]
    fn login_next_keeps_current_sort() {
        let req = TestRequest::get().uri("/?sort=price_low").to_http_request();

        assert_eq!(login_next(&req), "%2F%3Fsort%3Dprice_low");
    }
}
