use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::product::Product;
use crate::domain::wishlist::{WishlistEntry, WishlistItem};
use crate::dto::products::ProductView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WishlistItemView {
    pub id: i32,
    pub added_at: NaiveDateTime,
    pub product: ProductView,
}

impl From<WishlistItem> for WishlistItemView {
    fn from(item: WishlistItem) -> Self {
        Self {
            id: item.entry.id.get(),
            added_at: item.entry.added_at,
            product: ProductView::new(item.product, true),
        }
    }
}

/// Post-condition of a wishlist mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistChange {
    pub product: Product,
    /// The entry after an add; `None` after a remove.
    pub entry: Option<WishlistEntry>,
    /// `true` when an add inserted a new entry.
    pub created: bool,
    /// Rows deleted by a remove (0 or 1).
    pub removed: usize,
    pub in_wishlist: bool,
}
