//! Cart type.

use crate::cart::CartLine;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// A shopping cart.
///
/// Lines are kept in insertion order and are unique by product id. No
/// operation can bring a quantity below one: decrements floor at one and
/// lines leave the cart only through [`Cart::remove`].
///
/// The serialized form is a plain JSON array of lines. Deserialization goes
/// through [`Cart::from_lines`], so a hand-edited or stale snapshot is
/// normalized rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw lines, restoring the cart invariants.
    ///
    /// Lines for the same product are merged into the first occurrence and
    /// quantities are clamped into `1..=MAX_QUANTITY_PER_ITEM`.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            let quantity = line.quantity.clamp(1, MAX_QUANTITY_PER_ITEM);
            match cart.lines.iter_mut().find(|l| l.id() == line.id()) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .saturating_add(quantity)
                        .min(MAX_QUANTITY_PER_ITEM);
                }
                None => cart.lines.push(CartLine {
                    quantity,
                    ..line
                }),
            }
        }
        cart
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line for the product, or appends a new line
    /// with quantity one. Returns the line's new quantity.
    pub fn add(&mut self, product: Product) -> u32 {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.id() == product.id) {
            existing.quantity = existing.quantity.saturating_add(1).min(MAX_QUANTITY_PER_ITEM);
            tracing::debug!(product_id = %product.id, quantity = existing.quantity, "cart line incremented");
            return existing.quantity;
        }

        tracing::debug!(product_id = %product.id, "cart line added");
        self.lines.push(CartLine::new(product));
        1
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.id() != id);
        let removed = self.lines.len() < len_before;
        if removed {
            tracing::debug!(product_id = %id, "cart line removed");
        }
        removed
    }

    /// Change the quantity of the line for `id` by `delta`.
    ///
    /// The result is floored at one, so an underflow never removes the line.
    /// Returns the new quantity, or `None` when no line exists for `id`.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> Option<u32> {
        let line = self.lines.iter_mut().find(|l| l.id() == id)?;
        let target = i64::from(line.quantity)
            .saturating_add(delta)
            .clamp(1, i64::from(MAX_QUANTITY_PER_ITEM));
        // Clamped into 1..=MAX_QUANTITY_PER_ITEM above.
        line.quantity = u32::try_from(target).unwrap_or(1);
        tracing::debug!(product_id = %id, delta, quantity = line.quantity, "cart quantity updated");
        Some(line.quantity)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get the line for `id`.
    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id() == id)
    }

    /// All lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of quantity times unit price over all lines.
    pub fn total(&self, currency: Currency) -> Result<Money, CommerceError> {
        let subtotals = self
            .lines
            .iter()
            .map(CartLine::subtotal)
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(&subtotals, currency)
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn product(id: u32) -> Product {
        Catalog::builtin().get(ProductId::new(id)).unwrap().clone()
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(product(1)), 1);
        assert_eq!(cart.add(product(1)), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 2);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(product(3));
        cart.add(product(1));
        cart.add(product(3));

        let ids: Vec<u32> = cart.lines().iter().map(|l| l.id().get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_update_quantity_floors_at_one() {
        let mut cart = Cart::new();
        cart.add(product(2));
        cart.update_quantity(ProductId::new(2), 4);

        assert_eq!(cart.update_quantity(ProductId::new(2), -100), Some(1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_update_quantity_caps_at_max() {
        let mut cart = Cart::new();
        cart.add(product(2));
        assert_eq!(
            cart.update_quantity(ProductId::new(2), i64::MAX),
            Some(MAX_QUANTITY_PER_ITEM)
        );
    }

    #[test]
    fn test_update_quantity_unknown_id() {
        let mut cart = Cart::new();
        assert_eq!(cart.update_quantity(ProductId::new(5), 1), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add(product(1));
        assert!(cart.remove(ProductId::new(1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(product(1));
        let before = cart.clone();

        assert!(!cart.remove(ProductId::new(42)));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::new();
        cart.add(product(1)); // Rs.20
        cart.add(product(1));
        cart.add(product(2)); // Rs.30

        let total = cart.total(Currency::INR).unwrap();
        assert_eq!(total.display(), "Rs.70.00");
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_empty_total_is_zero() {
        assert!(Cart::new().total(Currency::INR).unwrap().is_zero());
    }

    #[test]
    fn test_from_lines_normalizes() {
        let lines = vec![
            CartLine { product: product(1), quantity: 0 },
            CartLine { product: product(2), quantity: 2 },
            CartLine { product: product(1), quantity: 3 },
        ];
        let cart = Cart::from_lines(lines);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 4);
        assert_eq!(cart.lines()[0].id(), ProductId::new(1));
    }

    #[test]
    fn test_serde_snapshot_round_trip() {
        let mut cart = Cart::new();
        cart.add(product(4));
        cart.add(product(7));
        cart.update_quantity(ProductId::new(7), 2);

        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));

        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
