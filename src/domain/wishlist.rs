use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::types::{ProductId, UserId, WishlistEntryId};

/// Membership of a product in a user's wishlist. Unique per `(user_id, product_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WishlistEntry {
    pub id: WishlistEntryId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub added_at: NaiveDateTime,
}

/// A wishlist entry joined with its product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WishlistItem {
    pub entry: WishlistEntry,
    pub product: Product,
}
