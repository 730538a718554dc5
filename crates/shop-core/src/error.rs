//! Error types for the storefront.

use std::path::PathBuf;

use shop_auth::AuthError;
use shop_cache::CacheError;
use shop_commerce::CommerceError;
use shop_router::Screen;
use thiserror::Error;

/// Errors that can occur in the storefront.
#[derive(Error, Debug)]
pub enum ShopError {
    /// Failed to read a config file.
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file could not be parsed.
    #[error("Failed to parse config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A config could not be written.
    #[error("Failed to write config file {path}: {message}")]
    ConfigWrite { path: PathBuf, message: String },

    /// The action needs a different screen to be on display.
    #[error("{action} is not available on the {screen:?} screen")]
    WrongScreen { action: &'static str, screen: Screen },

    /// Storage error.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Catalog or cart error.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Authentication error.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Result alias for storefront operations.
pub type Result<T, E = ShopError> = std::result::Result<T, E>;
