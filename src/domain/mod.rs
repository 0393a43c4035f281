pub mod auth;
pub mod category;
pub mod product;
pub mod types;
pub mod user;
pub mod wishlist;
