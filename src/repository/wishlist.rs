use std::collections::HashSet;

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::types::{ProductId, UserId};
use crate::domain::wishlist::{WishlistEntry, WishlistItem};
use crate::models::category::Category as DbCategory;
use crate::models::product::Product as DbProduct;
use crate::models::wishlist::{NewWishlistItem, WishlistItem as DbWishlistItem};
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, WishlistReader, WishlistWriter,
};

impl WishlistReader for DieselRepository {
    fn list_wishlist_product_ids(&self, user_id: UserId) -> RepositoryResult<HashSet<ProductId>> {
        use crate::schema::wishlist_items;

        let mut conn = self.conn()?;

        let ids = wishlist_items::table
            .filter(wishlist_items::user_id.eq(user_id.get()))
            .select(wishlist_items::product_id)
            .load::<i32>(&mut conn)?
            .into_iter()
            .map(ProductId::new)
            .collect::<Result<HashSet<ProductId>, _>>()?;

        Ok(ids)
    }

    fn list_wishlist_items(&self, user_id: UserId) -> RepositoryResult<Vec<WishlistItem>> {
        use crate::schema::{categories, products, wishlist_items};

        let mut conn = self.conn()?;

        let rows = wishlist_items::table
            .inner_join(products::table.inner_join(categories::table))
            .filter(wishlist_items::user_id.eq(user_id.get()))
            .order((wishlist_items::added_at.desc(), wishlist_items::id.desc()))
            .select((
                wishlist_items::all_columns,
                products::all_columns,
                categories::all_columns,
            ))
            .load::<(DbWishlistItem, DbProduct, DbCategory)>(&mut conn)?;

        let mut items = Vec::with_capacity(rows.len());
        for (item, product, category) in rows {
            items.push(WishlistItem {
                entry: item.try_into()?,
                product: (product, category).try_into()?,
            });
        }

        Ok(items)
    }
}

impl WishlistWriter for DieselRepository {
    fn add_wishlist_entry(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> RepositoryResult<(WishlistEntry, bool)> {
        use crate::schema::wishlist_items;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            // ON CONFLICT DO NOTHING against UNIQUE(user_id, product_id) makes
            // concurrent identical requests settle on a single row.
            let inserted = diesel::insert_into(wishlist_items::table)
                .values(NewWishlistItem {
                    user_id: user_id.get(),
                    product_id: product_id.get(),
                    added_at: Utc::now().naive_utc(),
                })
                .on_conflict_do_nothing()
                .execute(conn)?;

            let row = wishlist_items::table
                .filter(wishlist_items::user_id.eq(user_id.get()))
                .filter(wishlist_items::product_id.eq(product_id.get()))
                .first::<DbWishlistItem>(conn)?;

            Ok((row.try_into()?, inserted > 0))
        })
    }

    fn remove_wishlist_entry(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> RepositoryResult<usize> {
        use crate::schema::wishlist_items;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            wishlist_items::table
                .filter(wishlist_items::user_id.eq(user_id.get()))
                .filter(wishlist_items::product_id.eq(product_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
