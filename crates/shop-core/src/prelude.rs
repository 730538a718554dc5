//! Prelude for convenient imports.
//!
//! ```rust
//! use shop_core::prelude::*;
//! ```

pub use crate::views::{CatalogView, Flash, FlashKind, LoginView, RegisterView, SubmitOutcome};
pub use crate::{ActiveView, ScheduledTask, ShopConfig, ShopError, Storefront};

pub use shop_auth::{Field, FormErrors, Identity};
pub use shop_commerce::prelude::*;
pub use shop_router::{Navigation, Route, Screen};
