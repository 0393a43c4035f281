pub mod products;
pub mod wishlist;
