//! File-based config discovery for CLI use
//!
//! Handles finding and loading `cascade.toml` from the filesystem without the
//! environment overlay applied by [`CascadeConfig::load`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{CONFIG_FILE_NAME, CascadeConfig};
use crate::error::{ConfigError, Result};

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use cascade_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find `cascade.toml` in the root directory
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE_NAME);
        toml_path.exists().then_some(toml_path)
    }

    /// Load config from discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<CascadeConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    /// Load config from a specific file path
    pub fn load_from(&self, path: &Path) -> Result<CascadeConfig> {
        let content = fs::read_to_string(path)?;

        let toml_val: toml::Value =
            toml::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "toml".to_string(),
                hint: Some(format!("Invalid TOML syntax: {}", e)),
            })?;

        let value = serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: Some(format!("TOML to JSON conversion failed: {}", e)),
        })?;

        CascadeConfig::from_value(value)
    }
}

/// Discover and load config from current directory (convenience function)
pub fn discover() -> Result<CascadeConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}
