use std::collections::HashSet;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::product::{NewProduct, Product, SortKey};
use crate::domain::types::{CategoryId, CategoryName, ProductId, ProductName, UserId, Username};
use crate::domain::user::{NewUser, User};
use crate::domain::wishlist::{WishlistEntry, WishlistItem};

pub mod category;
pub mod errors;
pub mod product;
pub mod user;
pub mod wishlist;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Ordering of the result.
    pub sort: SortKey,
    /// Restrict to a single category.
    pub category_id: Option<CategoryId>,
    /// Restrict to an exact product name.
    pub name: Option<ProductName>,
}

impl ProductListQuery {
    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn name(mut self, name: ProductName) -> Self {
        self.name = Some(name);
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Return the category with the given name, creating it when missing.
    ///
    /// The boolean is `true` when a new row was inserted.
    fn get_or_create_category(&self, category: &NewCategory)
    -> RepositoryResult<(Category, bool)>;
    /// Rename a category.
    fn rename_category(&self, id: CategoryId, name: &CategoryName) -> RepositoryResult<usize>;
    /// Delete a category together with its products and their wishlist entries.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List every product matching the query, fully materialised.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
}

/// Write operations for product entities.
pub trait ProductWriter {
    /// Persist a new product and return it joined with its category.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    /// Delete a product and its wishlist entries.
    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize>;
}

/// Read-only operations for user accounts.
pub trait UserReader {
    /// Retrieve a user by identifier.
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    /// Retrieve a user and the stored password hash for credential checks.
    fn get_user_credentials(&self, username: &Username)
    -> RepositoryResult<Option<(User, String)>>;
    /// Whether an account already uses this name, ignoring ASCII case.
    fn username_taken(&self, username: &Username) -> RepositoryResult<bool>;
}

/// Write operations for user accounts.
pub trait UserWriter {
    /// Insert a new user. A taken username yields
    /// [`RepositoryError::ConstraintViolation`].
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
    /// Delete a user and their wishlist entries.
    fn delete_user(&self, id: UserId) -> RepositoryResult<usize>;
}

/// Read-only operations for wishlists.
pub trait WishlistReader {
    /// Identifiers of every product in the user's wishlist.
    fn list_wishlist_product_ids(&self, user_id: UserId) -> RepositoryResult<HashSet<ProductId>>;
    /// The user's wishlist joined with products, most recently added first.
    fn list_wishlist_items(&self, user_id: UserId) -> RepositoryResult<Vec<WishlistItem>>;
}

/// Write operations for wishlists.
pub trait WishlistWriter {
    /// Get-or-create the `(user, product)` entry. The boolean is `true` when
    /// the entry was inserted by this call.
    fn add_wishlist_entry(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> RepositoryResult<(WishlistEntry, bool)>;
    /// Delete the `(user, product)` entry, returning the number of removed rows.
    fn remove_wishlist_entry(&self, user_id: UserId, product_id: ProductId)
    -> RepositoryResult<usize>;
}
