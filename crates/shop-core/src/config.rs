//! Storefront configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopError};

/// Config file names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// Storefront configuration file.
///
/// Every section is optional; missing sections and keys take defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Timer configuration.
    #[serde(default)]
    pub timing: TimingConfig,
}

impl ShopConfig {
    /// Load config from a file. `.json` files are read as JSON, everything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ShopError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed = if is_json(path) {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            toml::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| ShopError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Save config to a file, in the format its extension implies.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let write_err = |message: String| ShopError::ConfigWrite {
            path: path.to_path_buf(),
            message,
        };

        let content = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|e| write_err(e.to_string()))?
        } else {
            toml::to_string_pretty(self).map_err(|e| write_err(e.to_string()))?
        };

        std::fs::write(path, content).map_err(|e| write_err(e.to_string()))
    }

    /// Find and load the nearest config file, walking up from `start`.
    ///
    /// Returns `Ok(None)` when no config file exists. A config file that
    /// exists but does not parse is an error.
    pub fn discover(start: impl AsRef<Path>) -> Result<Option<(PathBuf, Self)>> {
        let mut current = start.as_ref().to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    let config = Self::load(&candidate)?;
                    return Ok(Some((candidate, config)));
                }
            }
            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Lifetime of the "added to cart" notice.
    pub fn notice_delay(&self) -> Duration {
        Duration::from_millis(self.timing.notice_ms)
    }

    /// Delay before an entry view redirects after success.
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.timing.redirect_ms)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File backend location, relative to the working directory unless
    /// absolute.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".shop").join("storage.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Timer configuration, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// How long the cart notice stays up.
    #[serde(default = "default_notice_ms")]
    pub notice_ms: u64,

    /// Delay before an entry view redirects.
    #[serde(default = "default_redirect_ms")]
    pub redirect_ms: u64,
}

fn default_notice_ms() -> u64 {
    3000
}

fn default_redirect_ms() -> u64 {
    2000
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            notice_ms: default_notice_ms(),
            redirect_ms: default_redirect_ms(),
        }
    }
}

/// Generate a commented default `shop.toml`.
pub fn generate_default_config() -> String {
    r#"# Shopfront configuration

[storage]
# Where the cart is kept between runs.
path = ".shop/storage.json"

[timing]
# How long the "added to cart" notice stays up.
notice_ms = 3000
# Delay before the register and login forms redirect.
redirect_ms = 2000
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shop-core-config-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_defaults() {
        let config = ShopConfig::default();
        assert_eq!(config.storage.path, PathBuf::from(".shop/storage.json"));
        assert_eq!(config.notice_delay(), Duration::from_millis(3000));
        assert_eq!(config.redirect_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: ShopConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, ShopConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: ShopConfig = toml::from_str("[timing]\nnotice_ms = 500\n").unwrap();
        assert_eq!(config.timing.notice_ms, 500);
        assert_eq!(config.timing.redirect_ms, 2000);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = scratch_dir("json");
        let path = dir.join("shop.json");

        let mut config = ShopConfig::default();
        config.timing.redirect_ms = 10;
        config.save(&path).unwrap();

        assert_eq!(ShopConfig::load(&path).unwrap(), config);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = scratch_dir("invalid");
        let path = dir.join("shop.toml");
        std::fs::write(&path, "[timing\nnotice_ms = ").unwrap();

        let err = ShopConfig::load(&path).unwrap_err();
        assert!(matches!(err, ShopError::ConfigParse { .. }));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = scratch_dir("discover");
        let nested = dir.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.join(".shop.toml"), "[timing]\nredirect_ms = 1\n").unwrap();

        let (path, config) = ShopConfig::discover(&nested).unwrap().unwrap();
        assert_eq!(path, dir.join(".shop.toml"));
        assert_eq!(config.timing.redirect_ms, 1);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
