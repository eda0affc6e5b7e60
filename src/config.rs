//! Configuration management for tree-export
//!
//! Built-in defaults, overridden by an optional `tree-export.toml` and then
//! by `TREE_EXPORT_*` environment variables.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::transfer::DEFAULT_MIME_TYPE;

const CONFIG_FILE: &str = "tree-export";
const ENV_PREFIX: &str = "TREE_EXPORT";
const DEFAULT_MAX_FILE_SIZE_MB: u64 = 100;

/// Export configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Content type used when a write request carries none
    /// Environment: TREE_EXPORT_DEFAULT_MIME_TYPE
    pub default_mime_type: String,

    /// Largest payload accepted by a single write, in MB
    /// Environment: TREE_EXPORT_MAX_FILE_SIZE_MB
    pub max_file_size_mb: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_mime_type: DEFAULT_MIME_TYPE.to_string(),
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
        }
    }
}

impl ExportConfig {
    /// Load configuration from tree-export.toml (if present) with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .set_default("default_mime_type", DEFAULT_MIME_TYPE)?
            .set_default("max_file_size_mb", DEFAULT_MAX_FILE_SIZE_MB as i64)?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: ExportConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.default_mime_type.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "default_mime_type cannot be empty".into(),
            ));
        }

        if self.max_file_size_mb == 0 {
            return Err(config::ConfigError::Message(
                "max_file_size_mb must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get maximum file size in bytes
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn lock_env<'a>() -> std::sync::MutexGuard<'a, ()> {
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("lock poisoned")
    }

    #[test]
    fn defaults_apply_without_sources() {
        let _guard = lock_env();
        unsafe {
            env::remove_var("TREE_EXPORT_DEFAULT_MIME_TYPE");
            env::remove_var("TREE_EXPORT_MAX_FILE_SIZE_MB");
        }

        let config = ExportConfig::load().expect("defaults should load");
        assert_eq!(config, ExportConfig::default());
        assert_eq!(config.max_file_size_bytes(), 100 * 1024 * 1024);
    }

    #[test]
    fn environment_overrides_defaults() {
        let _guard = lock_env();
        unsafe {
            env::set_var("TREE_EXPORT_DEFAULT_MIME_TYPE", "text/plain");
            env::set_var("TREE_EXPORT_MAX_FILE_SIZE_MB", "5");
        }

        let config = ExportConfig::load();

        unsafe {
            env::remove_var("TREE_EXPORT_DEFAULT_MIME_TYPE");
            env::remove_var("TREE_EXPORT_MAX_FILE_SIZE_MB");
        }

        let config = config.expect("env config should load");
        assert_eq!(config.default_mime_type, "text/plain");
        assert_eq!(config.max_file_size_mb, 5);
    }

    #[test]
    fn zero_size_limit_is_rejected() {
        let config = ExportConfig {
            max_file_size_mb: 0,
            ..ExportConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_mime_type_is_rejected() {
        let config = ExportConfig {
            default_mime_type: "  ".into(),
            ..ExportConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
