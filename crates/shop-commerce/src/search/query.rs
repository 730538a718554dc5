//! Search query builder.

use crate::catalog::Product;
use crate::money::Money;
use crate::search::Filter;
use serde::{Deserialize, Serialize};

/// The catalog view's filter state.
///
/// Each clause is optional; an empty clause matches every product. Setting
/// a clause to an empty string clears it, which mirrors clearing the
/// corresponding input.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Name substring, matched case-insensitively.
    pub text: Option<String>,
    /// Selected category.
    pub category: Option<String>,
    /// Selected price ceiling.
    pub max_price: Option<Money>,
}

impl SearchQuery {
    /// Create an empty query that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.set_category(category);
        self
    }

    /// Set the price ceiling.
    pub fn with_max_price(mut self, max: Money) -> Self {
        self.max_price = Some(max);
        self
    }

    /// Replace the text query; empty input clears it.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = non_empty(text.into());
    }

    /// Replace the category; empty input clears it.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = non_empty(category.into());
    }

    /// Replace the price ceiling.
    pub fn set_max_price(&mut self, max: Option<Money>) {
        self.max_price = max;
    }

    /// Clear every clause.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check if no clause is set.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.category.is_none() && self.max_price.is_none()
    }

    /// The active clauses as filters.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(text) = &self.text {
            filters.push(Filter::text(text.clone()));
        }
        if let Some(category) = &self.category {
            filters.push(Filter::category(category.clone()));
        }
        if let Some(max) = self.max_price {
            filters.push(Filter::max_price(max));
        }
        filters
    }

    /// Check whether `product` satisfies every active clause.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters().iter().all(|f| f.matches(product))
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::money::Currency;

    #[test]
    fn test_empty_query_returns_full_catalog() {
        let catalog = Catalog::builtin();
        let query = SearchQuery::new();
        assert!(query.is_empty());
        assert_eq!(catalog.search(&query).len(), catalog.len());
    }

    #[test]
    fn test_unknown_category_returns_nothing() {
        let catalog = Catalog::builtin();
        let query = SearchQuery::new().with_category("Garden");
        assert!(catalog.search(&query).is_empty());
    }

    #[test]
    fn test_clauses_combine_with_and() {
        let catalog = Catalog::builtin();
        let query = SearchQuery::new()
            .with_text("product 1")
            .with_category("Books")
            .with_max_price(Money::from_major(100, Currency::INR));

        let names: Vec<_> = catalog.search(&query).iter().map(|p| p.name.as_str()).collect();
        // Books are 1, 5 and 9.
        assert_eq!(names, vec!["Product 1"]);
    }

    #[test]
    fn test_text_search_ignores_case() {
        let catalog = Catalog::builtin();
        let query = SearchQuery::new().with_text("PRODUCT 1");
        let ids: Vec<u32> = catalog.search(&query).iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 10, 11, 12]);
    }

    #[test]
    fn test_max_price_filter() {
        let catalog = Catalog::builtin();
        let query = SearchQuery::new().with_max_price(Money::from_major(40, Currency::INR));
        assert_eq!(catalog.search(&query).len(), 3);
    }

    #[test]
    fn test_empty_strings_clear_clauses() {
        let mut query = SearchQuery::new().with_text("lamp").with_category("Home");
        query.set_text("");
        query.set_category("");
        assert!(query.is_empty());
    }
}
