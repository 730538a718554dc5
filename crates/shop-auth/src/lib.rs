//! Authentication module for Shopfront.
//!
//! Provides the in-memory identity registry, the current session, and the
//! field validation used by the registration and login forms.
//!
//! Nothing here is durable: identities and the session live as long as the
//! [`SessionStore`] that holds them.

mod error;
mod identity;
mod store;
mod validation;

pub use error::AuthError;
pub use identity::Identity;
pub use store::SessionStore;
pub use validation::{
    is_well_formed_email, validate_login, validate_registration, Field, FormErrors,
    MIN_PASSWORD_LEN,
};
