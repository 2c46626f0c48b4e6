//! User settings loaded from `~/.connscope/config.toml`

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use connscope_core::{DEFAULT_CONNECTION_SELECTOR, ProviderDescriptor, ProviderRegistry};

/// Default list refresh interval
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds between background refreshes of the list
    pub poll_interval_secs: u64,

    /// Restrict the list to one namespace (None = all namespaces)
    pub namespace: Option<String>,

    /// Label selector identifying provider connection Secrets
    pub label_selector: String,

    /// Console base URL shown for the "Add connection" target
    pub console_url: Option<String>,

    /// Extra or overriding provider registry entries
    pub providers: Vec<ProviderDescriptor>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            namespace: None,
            label_selector: DEFAULT_CONNECTION_SELECTOR.to_string(),
            console_url: None,
            providers: Vec::new(),
        }
    }
}

impl Settings {
    /// Get the default config file path
    pub fn default_path() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        Some(home.join(".connscope").join("config.toml"))
    }

    /// Load settings from an explicit path, or the default path if it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content).context(format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Refresh interval, never shorter than one second
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Provider registry with configured entries applied
    pub fn registry(&self) -> ProviderRegistry {
        ProviderRegistry::builtin().with_providers(self.providers.iter().cloned())
    }
}
