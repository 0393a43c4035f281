use std::collections::HashSet;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::product::SortKey;
use crate::dto::products::{ProductListing, ProductView};
use crate::repository::{ProductListQuery, ProductReader, WishlistReader};

use super::{ServiceError, ServiceResult};

/// Core business logic for the product listing page.
///
/// Loads every product in the requested order and marks the ones already in
/// the viewer's wishlist. Anonymous viewers get `in_wishlist = false`
/// everywhere. Unknown sort values fall back to name ordering; the resolved
/// key is returned so the page can highlight it.
pub fn list_products<R>(
    sort: Option<&str>,
    viewer: Option<&AuthenticatedUser>,
    repo: &R,
) -> ServiceResult<ProductListing>
where
    R: ProductReader + WishlistReader,
{
    let sort = SortKey::parse(sort);

    let products = match repo.list_products(ProductListQuery::default().sort(sort)) {
        Ok(products) => products,
        Err(e) => {
            log::error!("Failed to list products: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let wishlist = match viewer {
        Some(user) => match repo.list_wishlist_product_ids(user.id) {
            Ok(ids) => ids,
            Err(e) => {
                log::error!("Failed to load wishlist for user {}: {e}", user.id);
                return Err(ServiceError::Internal);
            }
        },
        None => HashSet::new(),
    };

    let products = products
        .into_iter()
        .map(|product| {
            let in_wishlist = wishlist.contains(&product.id);
            ProductView::new(product, in_wishlist)
        })
        .collect();

    Ok(ProductListing { products, sort })
}
