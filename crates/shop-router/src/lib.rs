//! Routing for the Shopfront storefront.
//!
//! The storefront has a fixed route table:
//!
//! ```text
//! /           -> redirect to /login
//! /register   -> registration form
//! /login      -> login form
//! /home       -> catalog (session required)
//! /dashboard  -> catalog (session required)
//! ```
//!
//! Anything else resolves to the not-found screen.
//!
//! # Usage
//!
//! ```
//! use shop_router::prelude::*;
//!
//! let guard = RouteGuard::new();
//! assert_eq!(
//!     guard.resolve("/home", None),
//!     Navigation::Redirect { from: Route::Home, to: Route::Login },
//! );
//! assert_eq!(guard.resolve("/login", None), Navigation::Render(Screen::Login));
//! ```

mod guard;
mod route;

pub mod prelude;

pub use guard::{GuardDecision, Navigation, RouteGuard};
pub use route::{Route, Screen, UnknownRoute};
