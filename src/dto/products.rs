use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::product::{Product, SortKey};

/// Product row as rendered by the listing and wishlist templates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Decimal price with two places, e.g. `"39.99"`.
    pub price: String,
    pub category: String,
    /// Image path relative to the media root.
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
    pub in_wishlist: bool,
}

impl ProductView {
    pub fn new(product: Product, in_wishlist: bool) -> Self {
        Self {
            id: product.id.get(),
            name: product.name.into_inner(),
            description: product.description.into_inner(),
            price: product.price.to_string(),
            category: product.category.into_inner(),
            image: product.image.map(|image| image.into_inner()),
            created_at: product.created_at,
            in_wishlist,
        }
    }
}

/// Result of the product listing: every product plus the sort actually applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductListing {
    pub products: Vec<ProductView>,
    pub sort: SortKey,
}
