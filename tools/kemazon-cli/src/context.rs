//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use kemazon_cart::CartStore;
use kemazon_storage::FileStore;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["kemazon.toml", ".kemazon.toml", "kemazon.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some(config),
                        Err(e) => tracing::warn!(path = %config_path.display(), error = %e, "skipping unreadable config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory the cart file lives in.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Open the cart store for this session.
    ///
    /// Fails when the config is unusable, since store writes only log
    /// their errors.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let errors = self.config.validate();
        if !errors.is_empty() {
            bail!("Invalid configuration: {}", errors.join("; "));
        }
        let storage = FileStore::new(self.storage_dir());
        Ok(CartStore::initialize(storage, self.config.storage.key.clone()))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &Path, config: CliConfig) -> Context {
        Context {
            config,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_open_cart_rejects_empty_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storage.key = String::new();

        let err = context_in(dir.path(), config).open_cart().err().unwrap();
        assert!(err.to_string().contains("storage.key"));
    }

    #[test]
    fn test_open_cart_persists_under_storage_dir() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path(), CliConfig::default());

        let mut store = ctx.open_cart().unwrap();
        store.add_line(kemazon_cart::ProductSnapshot::new(
            "1",
            "Mate",
            kemazon_cart::Money::from_major(10),
        ));

        assert_eq!(ctx.open_cart().unwrap().derived_count(), 1);
        assert!(ctx.storage_dir().starts_with(dir.path()));
    }
}
