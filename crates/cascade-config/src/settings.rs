//! Global configuration settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// `silent`, `error`, `warn`, `info` or `debug`
    #[serde(default)]
    pub log_level: Option<String>,
}
