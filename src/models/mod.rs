pub mod category;
pub mod config;
pub mod product;
pub mod user;
pub mod wishlist;
