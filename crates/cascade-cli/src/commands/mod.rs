//! Command implementations. Each returns the text to print on stdout.

pub mod attribute;
pub mod check;
pub mod names;

use std::path::Path;

use anyhow::Context;
use cascade_config::CascadeConfig;
use cascade_css::CssBuildPlugin;

/// Load `cascade.toml` (plus `CASCADE_*` overrides) and build the plugin.
pub(crate) fn load_plugin(root: &Path) -> anyhow::Result<CssBuildPlugin> {
    let config = CascadeConfig::load(root)
        .with_context(|| format!("failed to load configuration from {}", root.display()))?;
    CssBuildPlugin::from_config(&config).context("invalid configuration")
}

/// `settings.log_level` from the project config, if it loads.
///
/// Load errors are left for the command itself to report.
pub fn configured_log_level(root: &Path) -> Option<String> {
    CascadeConfig::load(root).ok()?.settings.log_level
}
