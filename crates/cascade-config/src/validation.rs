//! Schema validation for CSS build configuration.

use crate::config::CascadeConfig;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &CascadeConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use cascade_config::{CascadeConfig, ConfigValidator, SchemaValidator};
///
/// SchemaValidator.validate(&CascadeConfig::default()).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &CascadeConfig) -> Result<()> {
        let base = &config.css.base;
        if !(base.starts_with('/') || base.starts_with("http://") || base.starts_with("https://"))
        {
            return Err(ConfigError::SchemaValidation {
                message: format!("css.base `{base}` must be absolute"),
                hint: Some("Start it with `/` or use a full http(s) URL".to_string()),
            });
        }

        for (module, name) in &config.css.manual_chunks {
            if module.trim().is_empty() || name.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "manual chunk entries cannot be empty".to_string(),
                    hint: Some("Remove empty keys or names from `css.manual_chunks`".to_string()),
                });
            }
        }

        if let Some(level) = &config.settings.log_level {
            let known = ["silent", "off", "error", "warn", "warning", "info", "debug"];
            if !known.contains(&level.to_lowercase().as_str()) {
                return Err(ConfigError::SchemaValidation {
                    message: format!("unknown log level `{level}`"),
                    hint: Some(format!("Use one of: {}", known.join(", "))),
                });
            }
        }

        Ok(())
    }
}

/// Validate with [`SchemaValidator`] (convenience function)
pub fn validate_schema(config: &CascadeConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_schema(&CascadeConfig::default()).is_ok());
    }

    #[test]
    fn relative_base_is_rejected() {
        let mut config = CascadeConfig::default();
        config.css.base = "assets/".to_string();
        assert!(matches!(
            validate_schema(&config),
            Err(ConfigError::SchemaValidation { .. })
        ));
    }

    #[test]
    fn cdn_base_is_accepted() {
        let mut config = CascadeConfig::default();
        config.css.base = "https://cdn.example.com/".to_string();
        assert!(validate_schema(&config).is_ok());
    }

    #[test]
    fn empty_manual_chunk_name_is_rejected() {
        let mut config = CascadeConfig::default();
        config
            .css
            .manual_chunks
            .insert("/src/a.css".to_string(), " ".to_string());
        assert!(validate_schema(&config).is_err());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let mut config = CascadeConfig::default();
        config.settings.log_level = Some("chatty".to_string());
        assert!(validate_schema(&config).is_err());
    }
}
