//! CLI configuration.

use anyhow::{Context, Result};
use kemazon_cart::{Currency, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// How amounts are shown.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Checkout hand-off settings.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config text, choosing the format from the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Problems that make the config unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.storage.dir.trim().is_empty() {
            errors.push("storage.dir must not be empty".to_string());
        }
        if self.storage.key.trim().is_empty() {
            errors.push("storage.key must not be empty".to_string());
        }
        let base = &self.checkout.asset_base_url;
        if !base.is_empty() && !base.starts_with("http://") && !base.starts_with("https://") {
            errors.push(format!(
                "checkout.asset_base_url '{}' must be an http(s) URL",
                base
            ));
        }
        errors
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the cart file, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    /// Storage key the cart is written under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_dir() -> String {
    ".kemazon".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            key: default_storage_key(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Currency amounts are formatted in.
    #[serde(default)]
    pub currency: Currency,
}

/// Checkout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Base URL relative image references are resolved against.
    #[serde(default = "default_asset_base_url")]
    pub asset_base_url: String,
}

fn default_asset_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            asset_base_url: default_asset_base_url(),
        }
    }
}

/// Generate a default kemazon.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Kemazon cart configuration

[storage]
dir = "{dir}"
key = "{key}"

[display]
currency = "ARS"

[checkout]
asset_base_url = "{base}"
"#,
        dir = default_storage_dir(),
        key = default_storage_key(),
        base = default_asset_base_url(),
    )
}
