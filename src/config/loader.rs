//! Configuration loader for courtside
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "COURTSIDE_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "COURTSIDE_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "COURTSIDE";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml` - Base default configuration (optional)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `COURTSIDE__*` environment variables (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    /// Configuration directory path
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
    /// Current application environment
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// Reads `COURTSIDE_CONFIG_DIR`, `COURTSIDE_CONFIG_FILE` and
    /// `COURTSIDE_APP_ENV` to determine where configuration comes from.
    ///
    /// # Errors
    ///
    /// Returns an error if both `COURTSIDE_CONFIG_DIR` and
    /// `COURTSIDE_CONFIG_FILE` are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && std::env::var(CONFIG_DIR_ENV).is_ok() {
            return Err(ConfigError::mutual_exclusivity(
                "COURTSIDE_CONFIG_DIR and COURTSIDE_CONFIG_FILE cannot both be set. \
                 Use COURTSIDE_CONFIG_DIR for layered configuration or \
                 COURTSIDE_CONFIG_FILE for a single configuration file.",
            ));
        }

        let environment = AppEnvironment::from_env();

        Ok(Self {
            config_dir,
            config_file,
            environment,
        })
    }

    /// Create a loader for a specific configuration file
    pub fn with_file(path: PathBuf) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Get the current application environment
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load configuration from all sources
    ///
    /// If a specific configuration file is set, loads only that file plus
    /// environment variable overrides. Otherwise, performs layered loading
    /// from the configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a named configuration file is missing, if
    /// parsing fails, or if the resulting settings fail validation checks
    /// performed by the caller.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;
        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let mut builder = Config::builder();

        if let Some(file) = &self.config_file {
            if !file.exists() {
                return Err(ConfigError::FileNotFound(file.display().to_string()));
            }
            builder = builder.add_source(File::from(file.as_path()).format(FileFormat::Toml));
        } else {
            builder = builder
                .add_source(self.optional_file(&self.config_dir.join("default.toml")))
                .add_source(self.optional_file(
                    &self
                        .config_dir
                        .join(format!("{}.toml", self.environment.as_str())),
                ))
                .add_source(self.optional_file(&self.config_dir.join("local.toml")));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn optional_file(&self, path: &Path) -> File<config::FileSourceFile, FileFormat> {
        File::from(path).format(FileFormat::Toml).required(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_specific_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
            [server]
            port = 9000

            [facility]
            opening_hour = 10
            "#
        )
        .unwrap();

        let loader = ConfigLoader::with_file(file.path().to_path_buf());
        let settings = loader.load().unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.facility.opening_hour, 10);
        assert_eq!(settings.facility.closing_hour, 22);
    }

    #[test]
    fn test_missing_specific_file_is_an_error() {
        let loader = ConfigLoader::with_file(PathBuf::from("/nonexistent/courtside.toml"));
        assert!(matches!(loader.load(), Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_missing_layered_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader {
            config_dir: dir.path().to_path_buf(),
            config_file: None,
            environment: AppEnvironment::Test,
        };
        let settings = loader.load().unwrap();
        assert_eq!(settings.server.port, 3000);
    }
}
