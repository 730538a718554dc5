//! Shopping cart module.
//!
//! Contains the cart and its line items.

mod cart;
mod line;

pub use cart::{Cart, MAX_QUANTITY_PER_ITEM};
pub use line::CartLine;
