//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use shop_cache::Cache;
use shop_core::ShopConfig;

use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration.
    pub config: ShopConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context, reading `config_path` or discovering a config file in
    /// the current directory or one of its parents.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                let config = ShopConfig::load(&path)?;
                (config, Some(path))
            }
            None => match ShopConfig::discover(&cwd)? {
                Some((path, config)) => (config, Some(path)),
                None => (ShopConfig::default(), None),
            },
        };

        match &config_path {
            Some(path) => output.debug(&format!("Using config {}", path.display())),
            None => output.debug("No config file found, using defaults"),
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Location of the storage file.
    ///
    /// A relative path is taken relative to the directory of the config
    /// file it came from, or to the working directory without one.
    pub fn storage_path(&self) -> PathBuf {
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(self.cwd.as_path());
        resolve(base, &self.config.storage.path)
    }

    /// Open the durable cart storage.
    pub fn open_cache(&self) -> Result<Cache> {
        let path = self.storage_path();
        self.output.debug(&format!("Opening storage {}", path.display()));
        Cache::open(&path).with_context(|| format!("Failed to open storage at {}", path.display()))
    }
}

fn resolve(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(config_path: Option<&str>) -> Context {
        Context {
            config: ShopConfig::default(),
            config_path: config_path.map(PathBuf::from),
            output: Output::new(false, true),
            cwd: PathBuf::from("/work/site"),
        }
    }

    #[test]
    fn test_storage_path_defaults_to_cwd() {
        let ctx = context(None);
        assert_eq!(ctx.storage_path(), PathBuf::from("/work/site/.shop/storage.json"));
    }

    #[test]
    fn test_storage_path_follows_config_file() {
        let ctx = context(Some("/work/shop.toml"));
        assert_eq!(ctx.storage_path(), PathBuf::from("/work/.shop/storage.json"));
    }

    #[test]
    fn test_absolute_storage_path() {
        let mut ctx = context(Some("/work/shop.toml"));
        ctx.config.storage.path = PathBuf::from("/var/lib/shop/cart.json");
        assert_eq!(ctx.storage_path(), PathBuf::from("/var/lib/shop/cart.json"));
    }
}
