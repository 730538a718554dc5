//! Catalog, money and cart types for the Shopfront storefront.
//!
//! This crate holds the pure domain logic of the storefront:
//!
//! - **Money**: integer minor units plus a currency code
//! - **Catalog**: the fixed product list and its lookups
//! - **Cart**: ordered line items, unique by product, quantity floored at one
//! - **Search**: composable name/category/price predicates over the catalog
//!
//! # Example
//!
//! ```
//! use shop_commerce::prelude::*;
//!
//! let catalog = Catalog::builtin();
//! let mut cart = Cart::new();
//!
//! let product = catalog.get(ProductId::new(1)).unwrap();
//! cart.add(product.clone());
//! cart.add(product.clone());
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.total(Currency::INR).unwrap().display(), "Rs.40.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, Product};
pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Product};

    // Cart
    pub use crate::cart::{Cart, CartLine, MAX_QUANTITY_PER_ITEM};

    // Search
    pub use crate::search::{Filter, SearchQuery};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_root_exports_match_prelude() {
        let catalog = crate::Catalog::builtin();
        let mut cart = crate::Cart::new();
        let product: &crate::Product = catalog.get(crate::ProductId::new(2)).unwrap();
        cart.add(product.clone());
        assert_eq!(cart.lines()[0], crate::CartLine::new(product.clone()));
        assert_eq!(cart.total(catalog.currency()).unwrap(), product.price);
    }
}
