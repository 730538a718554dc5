//! Shopfront core: views and the storefront application.
//!
//! # Architecture
//!
//! The storefront wires the domain crates together:
//!
//! - Entry views validate their forms and call the [`SessionStore`]
//! - Every navigation passes through the [`RouteGuard`]
//! - The catalog view filters products and keeps the cart, writing it to
//!   the durable [`Cache`] after every change
//! - Delayed work (redirects, notices) runs as a [`ScheduledTask`] that is
//!   cancelled when its owner goes away
//!
//! # Quick Start
//!
//! ```
//! use shop_cache::Cache;
//! use shop_core::prelude::*;
//!
//! let mut app = Storefront::new(ShopConfig::default(), Cache::memory());
//! app.navigate("/register");
//!
//! let form = app.register_view().unwrap();
//! form.set_name("Asha Rao");
//! form.set_email("asha@example.com");
//! form.set_password("hunter22");
//!
//! // Outside a runtime the redirect is applied at once.
//! let outcome = app.submit().unwrap();
//! assert!(matches!(outcome, SubmitOutcome::Accepted { .. }));
//! assert_eq!(app.screen(), Screen::Login);
//! ```
//!
//! [`SessionStore`]: shop_auth::SessionStore
//! [`RouteGuard`]: shop_router::RouteGuard
//! [`Cache`]: shop_cache::Cache

mod app;
mod config;
mod error;
mod task;

pub mod prelude;
pub mod views;

pub use app::{ActiveView, Storefront};
pub use config::{
    generate_default_config, ShopConfig, StorageConfig, TimingConfig, CONFIG_FILE_NAMES,
};
pub use error::{Result, ShopError};
pub use task::ScheduledTask;

// Re-export the domain crates
pub use shop_auth as auth;
pub use shop_cache as cache;
pub use shop_commerce as commerce;
pub use shop_router as router;
