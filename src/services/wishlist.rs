use crate::domain::auth::AuthenticatedUser;
use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::dto::wishlist::{WishlistChange, WishlistItemView};
use crate::repository::{ProductReader, RepositoryError, WishlistReader, WishlistWriter};
use crate::services::{ServiceError, ServiceResult, require_user};

fn load_product<R>(product_id: i32, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    let product_id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_product_by_id(product_id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to load product {product_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Add a product to the viewer's wishlist.
///
/// Idempotent: adding a product twice keeps a single entry and reports
/// `created = false` the second time.
pub fn add_to_wishlist<R>(
    product_id: i32,
    viewer: Option<&AuthenticatedUser>,
    repo: &R,
) -> ServiceResult<WishlistChange>
where
    R: ProductReader + WishlistWriter,
{
    let user = require_user(viewer)?;
    let product = load_product(product_id, repo)?;

    match repo.add_wishlist_entry(user.id, product.id) {
        Ok((entry, created)) => Ok(WishlistChange {
            product,
            entry: Some(entry),
            created,
            removed: 0,
            in_wishlist: true,
        }),
        // The product was deleted between the lookup and the insert.
        Err(RepositoryError::ConstraintViolation(_)) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to add product {} to wishlist: {e}", product.id);
            Err(ServiceError::Internal)
        }
    }
}

/// Remove a product from the viewer's wishlist.
///
/// The product must exist. Removing a product that is not in the wishlist
/// succeeds with `removed = 0`.
pub fn remove_from_wishlist<R>(
    product_id: i32,
    viewer: Option<&AuthenticatedUser>,
    repo: &R,
) -> ServiceResult<WishlistChange>
where
    R: ProductReader + WishlistWriter,
{
    let user = require_user(viewer)?;
    let product = load_product(product_id, repo)?;

    match repo.remove_wishlist_entry(user.id, product.id) {
        Ok(removed) => Ok(WishlistChange {
            product,
            entry: None,
            created: false,
            removed,
            in_wishlist: false,
        }),
        Err(e) => {
            log::error!("Failed to remove product {} from wishlist: {e}", product.id);
            Err(ServiceError::Internal)
        }
    }
}

/// The viewer's wishlist, most recently added first.
pub fn show_wishlist<R>(
    viewer: Option<&AuthenticatedUser>,
    repo: &R,
) -> ServiceResult<Vec<WishlistItemView>>
where
    R: WishlistReader,
{
    let user = require_user(viewer)?;

    match repo.list_wishlist_items(user.id) {
        Ok(items) => Ok(items.into_iter().map(WishlistItemView::from).collect()),
        Err(e) => {
            log::error!("Failed to list wishlist for user {}: {e}", user.id);
            Err(ServiceError::Internal)
        }
    }
}
