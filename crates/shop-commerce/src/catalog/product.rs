//! Product type.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Unique, static product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Category name used by the category filter.
    pub category: String,
    /// Short description for listings.
    pub description: String,
    /// Image reference (URL).
    pub image: String,
}

impl Product {
    /// Create a product with a placeholder image.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            description: format!("This is a description of {}.", name),
            name,
            price,
            category: category.into(),
            image: PLACEHOLDER_IMAGE.to_string(),
        }
    }

    /// Case-insensitive substring match on the product name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Image shown for products without their own artwork.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_product_defaults() {
        let p = Product::new(1, "Product 1", Money::from_major(20, Currency::INR), "Books");
        assert_eq!(p.description, "This is a description of Product 1.");
        assert_eq!(p.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_name_contains_ignores_case() {
        let p = Product::new(2, "Desk Lamp", Money::from_major(30, Currency::INR), "Home");
        assert!(p.name_contains("lamp"));
        assert!(p.name_contains("DESK"));
        assert!(p.name_contains(""));
        assert!(!p.name_contains("chair"));
    }
}
