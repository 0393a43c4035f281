use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::TypeConstraintError;
use crate::domain::wishlist::WishlistEntry as DomainWishlistEntry;
use crate::models::product::Product;
use crate::models::user::User;

/// Diesel model representing the `wishlist_items` join table.
#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(User))]
#[diesel(belongs_to(Product))]
#[diesel(table_name = crate::schema::wishlist_items)]
pub struct WishlistItem {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub added_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::wishlist_items)]
pub struct NewWishlistItem {
    pub user_id: i32,
    pub product_id: i32,
    pub added_at: NaiveDateTime,
}

impl TryFrom<WishlistItem> for DomainWishlistEntry {
    type Error = TypeConstraintError;

    fn try_from(item: WishlistItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item.id.try_into()?,
            user_id: item.user_id.try_into()?,
            product_id: item.product_id.try_into()?,
            added_at: item.added_at,
        })
    }
}
