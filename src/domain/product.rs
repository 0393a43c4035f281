use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, CategoryName, ImagePath, ProductDescription, ProductId, ProductName, ProductPrice,
};

/// A catalog product together with the name of the category that owns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: ProductDescription,
    pub price: ProductPrice,
    pub category_id: CategoryId,
    pub category: CategoryName,
    pub image: Option<ImagePath>,
    pub created_at: NaiveDateTime,
}

/// Information required to create a new [`Product`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: ProductDescription,
    pub price: ProductPrice,
    pub category_id: CategoryId,
    pub image: Option<ImagePath>,
    pub created_at: NaiveDateTime,
}

/// Ordering applied to the product listing.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Alphabetical by product name.
    #[default]
    Name,
    /// Ascending price.
    PriceLow,
    /// Descending price.
    PriceHigh,
}

impl SortKey {
    /// Parses a `sort` query value. Unknown or missing values fall back to [`SortKey::Name`].
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("price_low") => Self::PriceLow,
            Some("price_high") => Self::PriceHigh,
            _ => Self::Name,
        }
    }

    /// Query-string representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceLow => "price_low",
            Self::PriceHigh => "price_high",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_sort_keys() {
        assert_eq!(SortKey::parse(Some("name")), SortKey::Name);
        assert_eq!(SortKey::parse(Some("price_low")), SortKey::PriceLow);
        assert_eq!(SortKey::parse(Some("price_high")), SortKey::PriceHigh);
    }

    #[test]
    fn unknown_sort_keys_fall_back_to_name() {
        for value in [None, Some(""), Some("price"), Some("PRICE_LOW"), Some("-price")] {
            assert_eq!(SortKey::parse(value), SortKey::Name);
        }
    }

    #[test]
    fn round_trips_query_representation() {
        for key in [SortKey::Name, SortKey::PriceLow, SortKey::PriceHigh] {
            assert_eq!(SortKey::parse(Some(key.as_str())), key);
        }
    }
}
