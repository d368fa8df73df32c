use std::time::Duration;
use switcher_common::{Result, SwitchError};
use switcher_library::{StorageKeys, DEFAULT_NAMESPACE};

/// Size of the switcher panel in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSize {
    pub width: u32,
    pub height: u32,
}

/// Configuration for the plugin
#[derive(Debug, Clone)]
pub struct PluginConfig {
    pub storage_namespace: String,
    pub notify_timeout: Duration,
    pub panel: PanelSize,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            storage_namespace: DEFAULT_NAMESPACE.to_string(),
            notify_timeout: Duration::from_millis(2000),
            panel: PanelSize {
                width: 70,
                height: 70,
            },
        }
    }
}

impl PluginConfig {
    /// Defaults overridden by `THEME_SWITCHER_NAMESPACE` and `THEME_SWITCHER_NOTIFY_MS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(namespace) = lookup("THEME_SWITCHER_NAMESPACE") {
            if namespace.trim().is_empty() {
                return Err(SwitchError::Config(
                    "THEME_SWITCHER_NAMESPACE must not be empty".to_string(),
                ));
            }
            config.storage_namespace = namespace.trim().to_string();
        }

        if let Some(timeout) = lookup("THEME_SWITCHER_NOTIFY_MS") {
            let millis: u64 = timeout.trim().parse().map_err(|_| {
                SwitchError::Config(format!("THEME_SWITCHER_NOTIFY_MS is not a number: {}", timeout))
            })?;
            config.notify_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::with_namespace(&self.storage_namespace)
    }
}
