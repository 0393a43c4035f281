use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product, SortKey};
use crate::domain::types::ProductId;
use crate::models::category::Category as DbCategory;
use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
use crate::repository::{
    DieselRepository, ProductListQuery, ProductReader, ProductWriter, RepositoryError,
    RepositoryResult,
};

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let mut items = products::table
            .inner_join(categories::table)
            .select((products::all_columns, categories::all_columns))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            items = items.filter(products::category_id.eq(category_id.get()));
        }

        if let Some(name) = &query.name {
            items = items.filter(products::name.eq(name.as_str()));
        }

        // Name and id break ties so equal prices keep a stable order.
        items = match query.sort {
            SortKey::Name => items.order((products::name.asc(), products::id.asc())),
            SortKey::PriceLow => items.order((
                products::price_cents.asc(),
                products::name.asc(),
                products::id.asc(),
            )),
            SortKey::PriceHigh => items.order((
                products::price_cents.desc(),
                products::name.asc(),
                products::id.asc(),
            )),
        };

        let items = items
            .load::<(DbProduct, DbCategory)>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok(items)
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let product = products::table
            .inner_join(categories::table)
            .filter(products::id.eq(id.get()))
            .select((products::all_columns, categories::all_columns))
            .first::<(DbProduct, DbCategory)>(&mut conn)
            .optional()?;

        let product = product.map(TryInto::try_into).transpose()?;
        Ok(product)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::insert_into(products::table)
                .values(DbNewProduct::from(product))
                .get_result::<DbProduct>(conn)?;

            let category = categories::table
                .find(row.category_id)
                .first::<DbCategory>(conn)?;

            Ok((row, category).try_into()?)
        })
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let affected = diesel::delete(products::table.find(id.get())).execute(&mut conn)?;

        Ok(affected)
    }
}
