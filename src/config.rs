use crate::view::tweaks::SearchScope;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Browser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Scope a new search starts in
    #[serde(default)]
    pub default_scope: SearchScope,

    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            default_scope: SearchScope::default(),
            log_level: default_log_level(),
        }
    }
}

impl BrowserConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: BrowserConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), contents)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::Validation(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert_eq!(config.default_scope, SearchScope::Tweak);
        assert_eq!(config.log_level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = BrowserConfig::default();
        config.log_level = "DEBUG".to_string();
        assert!(config.validate().is_ok());

        config.log_level = "chatty".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: BrowserConfig = serde_json::from_str(r#"{"default_scope": "collection"}"#).unwrap();
        assert_eq!(config.default_scope, SearchScope::Collection);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let config = BrowserConfig {
            default_scope: SearchScope::Collection,
            log_level: "info".to_string(),
        };
        config.save_to_file(&config_path).unwrap();

        let loaded = BrowserConfig::load_from_file(&config_path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.json");

        std::fs::write(&config_path, r#"{"default_scope": "everything"}"#).unwrap();
        assert!(matches!(
            BrowserConfig::load_from_file(&config_path),
            Err(ConfigError::Parse(_))
        ));

        std::fs::write(&config_path, r#"{"log_level": "loud"}"#).unwrap();
        assert!(matches!(
            BrowserConfig::load_from_file(&config_path),
            Err(ConfigError::Validation(_))
        ));

        assert!(matches!(
            BrowserConfig::load_from_file(temp_dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
