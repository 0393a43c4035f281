use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{
    CategoryName, ImagePath, ProductDescription, ProductName, ProductPrice, TypeConstraintError,
};
use crate::models::category::Category;

/// Diesel model representing a row in the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Category))]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub category_id: i32,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Product`] used for creating new rows.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price_cents: i64,
    pub category_id: i32,
    pub image: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

/// Products are always loaded joined with their owning category.
impl TryFrom<(Product, Category)> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from((product, category): (Product, Category)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: product.id.try_into()?,
            name: ProductName::new(product.name)?,
            description: ProductDescription::new(product.description)?,
            price: ProductPrice::from_cents(product.price_cents)?,
            category_id: product.category_id.try_into()?,
            category: CategoryName::new(category.name)?,
            image: product.image.map(ImagePath::new).transpose()?,
            created_at: product.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            name: product.name.as_str(),
            description: product.description.as_str(),
            price_cents: product.price.cents(),
            category_id: product.category_id.get(),
            image: product.image.as_ref().map(|image| image.as_str()),
            created_at: product.created_at,
        }
    }
}
