//! Durable key-value storage with JSON values.
//!
//! The storefront keeps a small amount of client state (the cart) in a
//! string-to-string store, the way a browser keeps it in local storage.
//! [`Cache`] layers typed JSON access over a pluggable [`KvStore`]:
//!
//! - [`MemoryStore`]: process-local, for tests and ephemeral runs
//! - [`FileStore`]: a single JSON file, rewritten atomically on every change
//!
//! # Example
//!
//! ```
//! use shop_cache::Cache;
//!
//! let cache = Cache::memory();
//! cache.set("cart", &vec![1, 2, 3]).unwrap();
//!
//! let cart: Option<Vec<u32>> = cache.get("cart").unwrap();
//! assert_eq!(cart, Some(vec![1, 2, 3]));
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
