//! Sample catalog used by the `populate_db` binary.

use chrono::Utc;

use crate::domain::category::NewCategory;
use crate::domain::product::NewProduct;
use crate::domain::types::{CategoryName, ProductDescription, ProductName, ProductPrice};
use crate::repository::{CategoryWriter, ProductListQuery, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// `(category, name, description, price in cents)`
const SAMPLE_PRODUCTS: &[(&str, &str, &str, i64)] = &[
    (
        "Electronics",
        "Wireless Mouse",
        "Ergonomic wireless mouse with USB receiver",
        2999,
    ),
    (
        "Books",
        "Python Programming Book",
        "Learn Python from scratch",
        3999,
    ),
    ("Clothing", "Cotton T-Shirt", "Comfortable cotton t-shirt", 1999),
    (
        "Home & Kitchen",
        "Coffee Maker",
        "Automatic drip coffee maker",
        7999,
    ),
    (
        "Electronics",
        "Laptop Stand",
        "Aluminum adjustable laptop stand",
        4999,
    ),
    ("Books", "Django Cookbook", "Advanced Django recipes", 4499),
    ("Clothing", "Running Shoes", "Lightweight running shoes", 8999),
    ("Home & Kitchen", "Blender", "High-speed kitchen blender", 9999),
];

const SAMPLE_CATEGORIES: &[&str] = &["Electronics", "Books", "Clothing", "Home & Kitchen"];

/// Rows inserted by [`populate`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub categories_created: usize,
    pub products_created: usize,
    pub products_skipped: usize,
}

/// Insert the sample categories and products.
///
/// Safe to run repeatedly: categories are looked up by name and a product is
/// skipped when its category already holds a product with the same name.
pub fn populate<R>(repo: &R) -> ServiceResult<SeedReport>
where
    R: CategoryWriter + ProductReader + ProductWriter,
{
    let mut report = SeedReport::default();
    let mut categories = Vec::with_capacity(SAMPLE_CATEGORIES.len());

    for name in SAMPLE_CATEGORIES {
        let new_category = NewCategory {
            name: CategoryName::new(*name)?,
        };
        let (category, created) = repo.get_or_create_category(&new_category).map_err(|e| {
            log::error!("Failed to create category {name}: {e}");
            ServiceError::Internal
        })?;
        if created {
            report.categories_created += 1;
        }
        categories.push(category);
    }

    for (category_name, name, description, cents) in SAMPLE_PRODUCTS {
        let Some(category) = categories.iter().find(|c| c.name == *category_name) else {
            log::error!("Sample product {name} refers to unknown category {category_name}");
            return Err(ServiceError::Internal);
        };
        let name = ProductName::new(*name)?;

        let query = ProductListQuery::default()
            .category(category.id)
            .name(name.clone());
        let existing = repo.list_products(query).map_err(|e| {
            log::error!("Failed to look up product {name}: {e}");
            ServiceError::Internal
        })?;
        if !existing.is_empty() {
            report.products_skipped += 1;
            continue;
        }

        let new_product = NewProduct {
            name,
            description: ProductDescription::new(*description)?,
            price: ProductPrice::from_cents(*cents)?,
            category_id: category.id,
            image: None,
            created_at: Utc::now().naive_utc(),
        };
        repo.create_product(&new_product).map_err(|e| {
            log::error!("Failed to create product {}: {e}", new_product.name);
            ServiceError::Internal
        })?;
        report.products_created += 1;
    }

    log::info!(
        "Seeded {} categories and {} products ({} already present)",
        report.categories_created,
        report.products_created,
        report.products_skipped
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::SortKey;
    use crate::repository::CategoryReader;
    use crate::repository::test::TestRepository;

    #[test]
    fn creates_sample_catalog() {
        let repo = TestRepository::default();

        let report = populate(&repo).unwrap();

        assert_eq!(
            report,
            SeedReport {
                categories_created: 4,
                products_created: 8,
                products_skipped: 0,
            }
        );
        let products = repo
            .list_products(ProductListQuery::default().sort(SortKey::PriceLow))
            .unwrap();
        assert_eq!(products[0].name, "Cotton T-Shirt");
        assert_eq!(products[0].price.to_string(), "19.99");
        assert_eq!(products[7].name, "Blender");
        assert_eq!(products[7].category, "Home & Kitchen");
    }

    #[test]
    fn second_run_is_a_no_op() {
        let repo = TestRepository::default();
        populate(&repo).unwrap();

        let report = populate(&repo).unwrap();

        assert_eq!(
            report,
            SeedReport {
                categories_created: 0,
                products_created: 0,
                products_skipped: 8,
            }
        );
        assert_eq!(repo.list_categories().unwrap().len(), 4);
        assert_eq!(repo.list_products(ProductListQuery::default()).unwrap().len(), 8);
    }
}
