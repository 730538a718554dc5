//! Search filter types.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A single predicate over catalog products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Filter {
    /// Case-insensitive substring match on the product name.
    Text(String),
    /// Exact category match.
    Category(String),
    /// Unit price at most this amount.
    MaxPrice(Money),
}

impl Filter {
    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Create a category filter.
    pub fn category(name: impl Into<String>) -> Self {
        Filter::Category(name.into())
    }

    /// Create a price ceiling filter.
    pub fn max_price(max: Money) -> Self {
        Filter::MaxPrice(max)
    }

    /// Check whether `product` satisfies this filter.
    ///
    /// A price ceiling in a different currency matches nothing.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Text(query) => product.name_contains(query),
            Filter::Category(name) => product.category == *name,
            Filter::MaxPrice(max) => {
                product.price.currency == max.currency
                    && product.price.amount_minor <= max.amount_minor
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn lamp() -> Product {
        Product::new(1, "Desk Lamp", Money::from_major(40, Currency::INR), "Home")
    }

    #[test]
    fn test_text_filter() {
        assert!(Filter::text("LAMP").matches(&lamp()));
        assert!(!Filter::text("chair").matches(&lamp()));
    }

    #[test]
    fn test_category_filter_is_exact() {
        assert!(Filter::category("Home").matches(&lamp()));
        assert!(!Filter::category("home").matches(&lamp()));
    }

    #[test]
    fn test_max_price_is_inclusive() {
        assert!(Filter::max_price(Money::from_major(40, Currency::INR)).matches(&lamp()));
        assert!(!Filter::max_price(Money::new(3999, Currency::INR)).matches(&lamp()));
    }

    #[test]
    fn test_max_price_other_currency() {
        assert!(!Filter::max_price(Money::from_major(1000, Currency::USD)).matches(&lamp()));
    }
}
