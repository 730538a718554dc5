//! Screens of the storefront.
//!
//! Each view holds the state of one screen and is rebuilt whenever that
//! screen is navigated to.

mod catalog;
mod entry;

pub use catalog::{CatalogView, CART_KEY};
pub use entry::{
    Flash, FlashKind, LoginView, RegisterView, SubmitOutcome, LOGGED_IN, REGISTERED,
    UNEXPECTED_ERROR,
};
