//! The fixed storefront catalog.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::search::SearchQuery;

/// Categories of the built-in catalog, in display order.
const BUILTIN_CATEGORIES: [&str; 4] = ["Books", "Clothing", "Electronics", "Home"];

/// Number of products in the built-in catalog.
const BUILTIN_SIZE: u32 = 12;

/// A read-only list of products.
///
/// Products are neither created nor destroyed at runtime; views borrow
/// from the catalog and clone a product only when it enters the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
    currency: Currency,
}

impl Catalog {
    /// Create a catalog from a product list priced in `currency`.
    pub fn new(products: Vec<Product>, currency: Currency) -> Self {
        Self { products, currency }
    }

    /// The built-in demo catalog: twelve products priced Rs.20 to Rs.130,
    /// spread over four categories.
    pub fn builtin() -> Self {
        let products = (1..=BUILTIN_SIZE)
            .map(|n| {
                let category = BUILTIN_CATEGORIES[(n as usize - 1) % BUILTIN_CATEGORIES.len()];
                Product::new(
                    n,
                    format!("Product {}", n),
                    Money::from_major(i64::from(n + 1) * 10, Currency::INR),
                    category,
                )
            })
            .collect();
        Self::new(products, Currency::INR)
    }

    /// Currency all catalog prices are expressed in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a product by id, failing if it is not in the catalog.
    pub fn require(&self, id: ProductId) -> Result<&Product, CommerceError> {
        self.get(id).ok_or(CommerceError::ProductNotFound(id))
    }

    /// Distinct category names, in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    /// Products matching every clause of `query`, in catalog order.
    pub fn search(&self, query: &SearchQuery) -> Vec<&Product> {
        self.products.iter().filter(|p| query.matches(p)).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.currency(), Currency::INR);

        let first = catalog.get(ProductId::new(1)).unwrap();
        assert_eq!(first.name, "Product 1");
        assert_eq!(first.price.display_compact(), "Rs.20");

        let last = catalog.get(ProductId::new(12)).unwrap();
        assert_eq!(last.price.display_compact(), "Rs.130");
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = Catalog::builtin();
        let mut ids: Vec<_> = catalog.products().iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_categories_in_order() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.categories(),
            vec!["Books", "Clothing", "Electronics", "Home"]
        );
    }

    #[test]
    fn test_require_missing_product() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.require(ProductId::new(99)),
            Err(CommerceError::ProductNotFound(ProductId::new(99)))
        );
    }
}
