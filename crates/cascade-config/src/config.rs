//! High-level configuration structure for the CSS build layer.
//!
//! This module provides `CascadeConfig` and layered loading. For plain
//! file discovery, see the `discovery` module.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};
use crate::settings::GlobalSettings;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "cascade.toml";

/// Prefix of environment variable overrides, e.g. `CASCADE_CSS__MINIFY=false`.
pub const ENV_PREFIX: &str = "CASCADE_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CascadeConfig {
    #[serde(default)]
    pub css: CssBuildConfig,

    #[serde(default)]
    pub settings: GlobalSettings,
}

/// Where `<link>` tags for unordered (client-only, single-file) stylesheets go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnorderedPlacement {
    /// Before every ordered stylesheet, so page styles can override them.
    #[default]
    First,
    Last,
}

/// CSS build configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssBuildConfig {
    /// Split CSS per chunk. When disabled the bundler emits a single
    /// `style.css` that every page links.
    #[serde(default = "default_true")]
    pub code_split: bool,

    /// Minify CSS emitted by the server pass.
    #[serde(default = "default_true")]
    pub minify: bool,

    #[serde(default)]
    pub unordered_placement: UnorderedPlacement,

    /// Prefix for stylesheet hrefs.
    #[serde(default = "default_base")]
    pub base: String,

    /// Module id → chunk name. Takes precedence over page-derived names.
    #[serde(default)]
    pub manual_chunks: IndexMap<String, String>,
}

impl Default for CssBuildConfig {
    fn default() -> Self {
        Self {
            code_split: true,
            minify: true,
            unordered_placement: UnorderedPlacement::First,
            base: default_base(),
            manual_chunks: IndexMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_base() -> String {
    "/".to_string()
}

impl CascadeConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use cascade_config::CascadeConfig;
    /// use serde_json::json;
    ///
    /// let config = CascadeConfig::from_value(json!({
    ///     "css": { "code_split": false }
    /// }))
    /// .unwrap();
    /// assert!(!config.css.code_split);
    /// assert!(config.css.minify);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Load configuration from multiple sources.
    /// Priority: environment variables > `cascade.toml` in `root` > defaults
    pub fn load(root: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = root.as_ref().join(CONFIG_FILE_NAME);
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Toml::file(&path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            hint: Some(e.to_string()),
        })
    }
}
