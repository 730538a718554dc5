//! Cart line items.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One product plus its quantity in the cart.
///
/// Serializes flattened, as the product's own fields followed by
/// `quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// The product, as it was when added.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity, at least one.
    pub quantity: u32,
}

impl CartLine {
    /// Create a line with quantity one.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The product id this line is keyed by.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Quantity times unit price.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.product
            .price
            .try_multiply(i64::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn line(quantity: u32) -> CartLine {
        let product = Product::new(3, "Product 3", Money::from_major(40, Currency::INR), "Electronics");
        CartLine { product, quantity }
    }

    #[test]
    fn test_subtotal() {
        assert_eq!(line(3).subtotal().unwrap(), Money::from_major(120, Currency::INR));
    }

    #[test]
    fn test_serializes_flat() {
        let value = serde_json::to_value(line(2)).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["name"], "Product 3");
        assert_eq!(value["quantity"], 2);
        assert!(value.get("product").is_none());
    }
}
