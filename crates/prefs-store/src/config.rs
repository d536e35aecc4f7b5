use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Configuration for a durable preferences store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Logical store name. Determines the file name when `path` is unset.
    pub suite: String,
    /// Explicit location of the preferences document.
    pub path: Option<PathBuf>,
    /// Attempt a final flush when the store is dropped.
    pub flush_on_drop: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            suite: "default".into(),
            path: None,
            flush_on_drop: true,
        }
    }
}

impl StoreConfig {
    /// Configuration for a named suite at the default location.
    pub fn suite(name: impl Into<String>) -> Self {
        Self {
            suite: name.into(),
            ..Default::default()
        }
    }

    /// Configuration for an explicit document path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Parse a configuration from TOML. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> StoreResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| StoreError::Config(e.to_string()))?;
        if config.suite.is_empty() && config.path.is_none() {
            return Err(StoreError::Config(
                "either `suite` or `path` must be set".into(),
            ));
        }
        Ok(config)
    }

    /// Where the preferences document lives.
    ///
    /// An explicit `path` wins; otherwise `<config dir>/<suite>.prefs.json`.
    pub fn resolved_path(&self) -> StoreResult<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let dir = dirs::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(dir.join(format!("{}.prefs.json", self.suite)))
    }
}
