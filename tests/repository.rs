use chrono::Utc;
use minimart::domain::category::NewCategory;
use minimart::domain::product::SortKey;
use minimart::domain::types::{CategoryName, ProductId, ProductName, Username};
use minimart::domain::user::{NewUser, User};
use minimart::repository::{
    CategoryReader, CategoryWriter, ProductListQuery, ProductReader, ProductWriter,
    RepositoryError, UserReader, UserWriter, WishlistReader, WishlistWriter,
};

mod common;

use common::{TestDb, create_category, create_product};

fn create_user(repo: &impl UserWriter, username: &str) -> User {
    repo.create_user(&NewUser {
        username: Username::new(username).expect("valid username"),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        created_at: Utc::now().naive_utc(),
    })
    .expect("should create user")
}

fn names(products: &[minimart::domain::product::Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn get_or_create_category_is_idempotent() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let new_category = NewCategory {
        name: CategoryName::new("Books").expect("valid name"),
    };

    let (first, created_first) = repo
        .get_or_create_category(&new_category)
        .expect("should create category");
    let (second, created_second) = repo
        .get_or_create_category(&new_category)
        .expect("should fetch category");

    assert!(created_first);
    assert!(!created_second);
    assert_eq!(first, second);
    assert_eq!(repo.list_categories().expect("should list").len(), 1);
}

#[test]
fn lists_products_in_requested_order() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let books = create_category(&repo, "Books");
    let electronics = create_category(&repo, "Electronics");
    create_product(&repo, &books, "Python Book", 3999);
    create_product(&repo, &electronics, "Mouse", 2999);
    create_product(&repo, &electronics, "Keyboard", 2999);

    let by_name = repo
        .list_products(ProductListQuery::default())
        .expect("should list products");
    let low = repo
        .list_products(ProductListQuery::default().sort(SortKey::PriceLow))
        .expect("should list products");
    let high = repo
        .list_products(ProductListQuery::default().sort(SortKey::PriceHigh))
        .expect("should list products");

    assert_eq!(names(&by_name), vec!["Keyboard", "Mouse", "Python Book"]);
    assert_eq!(names(&low), vec!["Keyboard", "Mouse", "Python Book"]);
    assert_eq!(names(&high), vec!["Python Book", "Keyboard", "Mouse"]);
    assert!(low.windows(2).all(|w| w[0].price <= w[1].price));
    assert_eq!(low[2].category, "Books");
    assert_eq!(low[2].price.to_string(), "39.99");
}

#[test]
fn filters_products_by_category_and_name() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let books = create_category(&repo, "Books");
    let electronics = create_category(&repo, "Electronics");
    create_product(&repo, &books, "Manual", 1000);
    create_product(&repo, &electronics, "Manual", 2000);

    let found = repo
        .list_products(
            ProductListQuery::default()
                .category(electronics.id)
                .name(ProductName::new("Manual").expect("valid name")),
        )
        .expect("should list products");

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].category_id, electronics.id);
}

#[test]
fn wishlist_entries_are_unique_per_user_and_product() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let category = create_category(&repo, "Electronics");
    let mouse = create_product(&repo, &category, "Mouse", 2999);
    let alice = create_user(&repo, "alice");

    let (first, created_first) = repo
        .add_wishlist_entry(alice.id, mouse.id)
        .expect("should add entry");
    let (second, created_second) = repo
        .add_wishlist_entry(alice.id, mouse.id)
        .expect("should return existing entry");

    assert!(created_first);
    assert!(!created_second);
    assert_eq!(first.id, second.id);
    assert_eq!(
        repo.list_wishlist_items(alice.id)
            .expect("should list wishlist")
            .len(),
        1
    );
}

#[test]
fn wishlist_rejects_unknown_products() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let alice = create_user(&repo, "alice");

    let result = repo.add_wishlist_entry(alice.id, ProductId::new(42).expect("valid id"));

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[test]
fn removing_wishlist_entries_reports_affected_rows() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let category = create_category(&repo, "Electronics");
    let mouse = create_product(&repo, &category, "Mouse", 2999);
    let alice = create_user(&repo, "alice");
    repo.add_wishlist_entry(alice.id, mouse.id)
        .expect("should add entry");

    let removed = repo
        .remove_wishlist_entry(alice.id, mouse.id)
        .expect("should remove entry");
    let removed_again = repo
        .remove_wishlist_entry(alice.id, mouse.id)
        .expect("should be a no-op");

    assert_eq!(removed, 1);
    assert_eq!(removed_again, 0);
    assert!(
        repo.list_wishlist_product_ids(alice.id)
            .expect("should list ids")
            .is_empty()
    );
}

#[test]
fn wishlist_lists_newest_first() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let category = create_category(&repo, "Electronics");
    let mouse = create_product(&repo, &category, "Mouse", 2999);
    let keyboard = create_product(&repo, &category, "Keyboard", 4999);
    let alice = create_user(&repo, "alice");
    repo.add_wishlist_entry(alice.id, mouse.id)
        .expect("should add entry");
    repo.add_wishlist_entry(alice.id, keyboard.id)
        .expect("should add entry");

    let items = repo
        .list_wishlist_items(alice.id)
        .expect("should list wishlist");

    let names: Vec<&str> = items.iter().map(|i| i.product.name.as_str()).collect();
    assert_eq!(names, vec!["Keyboard", "Mouse"]);
    assert_eq!(items[0].product.category, "Electronics");
}

#[test]
fn deleting_a_category_cascades_to_products_and_wishlists() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let books = create_category(&repo, "Books");
    let electronics = create_category(&repo, "Electronics");
    let book = create_product(&repo, &books, "Python Book", 3999);
    let mouse = create_product(&repo, &electronics, "Mouse", 2999);
    let alice = create_user(&repo, "alice");
    repo.add_wishlist_entry(alice.id, book.id)
        .expect("should add entry");
    repo.add_wishlist_entry(alice.id, mouse.id)
        .expect("should add entry");

    let deleted = repo
        .delete_category(books.id)
        .expect("should delete category");

    assert_eq!(deleted, 1);
    assert!(
        repo.get_product_by_id(book.id)
            .expect("should query product")
            .is_none()
    );
    let remaining = repo
        .list_wishlist_product_ids(alice.id)
        .expect("should list ids");
    assert_eq!(remaining.len(), 1);
    assert!(remaining.contains(&mouse.id));
}

#[test]
fn deleting_a_user_clears_their_wishlist() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let category = create_category(&repo, "Electronics");
    let mouse = create_product(&repo, &category, "Mouse", 2999);
    let alice = create_user(&repo, "alice");
    repo.add_wishlist_entry(alice.id, mouse.id)
        .expect("should add entry");

    assert_eq!(repo.delete_user(alice.id).expect("should delete user"), 1);

    assert!(
        repo.get_user_by_id(alice.id)
            .expect("should query user")
            .is_none()
    );
    assert!(
        repo.list_wishlist_items(alice.id)
            .expect("should list wishlist")
            .is_empty()
    );
}

#[test]
fn renaming_a_category_updates_product_listing() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let category = create_category(&repo, "Kitchen");
    let blender = create_product(&repo, &category, "Blender", 9999);

    repo.rename_category(
        category.id,
        &CategoryName::new("Home & Kitchen").expect("valid name"),
    )
    .expect("should rename");

    let product = repo
        .get_product_by_id(blender.id)
        .expect("should query product")
        .expect("product should exist");
    assert_eq!(product.category, "Home & Kitchen");
}

#[test]
fn duplicate_usernames_are_rejected() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    create_user(&repo, "alice");

    let result = repo.create_user(&NewUser {
        username: Username::new("alice").expect("valid username"),
        password_hash: "hash".to_string(),
        created_at: Utc::now().naive_utc(),
    });

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[test]
fn username_taken_ignores_case() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    create_user(&repo, "Alice");

    let taken = |name: &str| {
        repo.username_taken(&Username::new(name).expect("valid username"))
            .expect("should query users")
    };

    assert!(taken("Alice"));
    assert!(taken("alice"));
    assert!(taken("ALICE"));
    assert!(!taken("alice2"));
}

#[test]
fn category_lookup_by_id() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let books = create_category(&repo, "Books");

    let found = repo
        .get_category_by_id(books.id)
        .expect("should query category")
        .expect("category should exist");
    assert_eq!(found.name.as_str(), "Books");

    repo.delete_category(books.id)
        .expect("should delete category");
    assert!(
        repo.get_category_by_id(books.id)
            .expect("should query category")
            .is_none()
    );
}

#[test]
fn credentials_lookup_returns_stored_hash() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let alice = create_user(&repo, "alice");

    let (user, hash) = repo
        .get_user_credentials(&alice.username)
        .expect("should query user")
        .expect("user should exist");

    assert_eq!(user.id, alice.id);
    assert!(hash.starts_with("$argon2id$"));
    assert!(
        repo.get_user_credentials(&Username::new("bob").expect("valid username"))
            .expect("should query user")
            .is_none()
    );
}
