//! Helpers for integration tests.
#![allow(dead_code)]

use chrono::Utc;
use minimart::db::{DbPool, establish_connection_pool, run_migrations};
use minimart::domain::category::{Category, NewCategory};
use minimart::domain::product::{NewProduct, Product};
use minimart::domain::types::{CategoryName, ProductDescription, ProductName, ProductPrice};
use minimart::repository::{CategoryWriter, DieselRepository, ProductWriter};
use tempfile::NamedTempFile;

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        run_migrations(&mut conn).expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn create_category(repo: &DieselRepository, name: &str) -> Category {
    let new_category = NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
    };
    repo.get_or_create_category(&new_category)
        .expect("should create category")
        .0
}

pub fn create_product(
    repo: &DieselRepository,
    category: &Category,
    name: &str,
    cents: i64,
) -> Product {
    let new_product = NewProduct {
        name: ProductName::new(name).expect("valid product name"),
        description: ProductDescription::new(format!("About {name}")).expect("valid description"),
        price: ProductPrice::from_cents(cents).expect("valid price"),
        category_id: category.id,
        image: None,
        created_at: Utc::now().naive_utc(),
    };
    repo.create_product(&new_product)
        .expect("should create product")
}
