//! Product catalog module.
//!
//! Contains the product type and the fixed, read-only storefront catalog.

mod catalog;
mod product;

pub use catalog::Catalog;
pub use product::Product;
