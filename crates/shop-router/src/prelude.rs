//! Prelude for convenient imports.
//!
//! ```rust
//! use shop_router::prelude::*;
//! ```

pub use crate::{GuardDecision, Navigation, Route, RouteGuard, Screen};
