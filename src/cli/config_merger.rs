//! Configuration merger for CLI arguments and config files
//!
//! Merges CLI argument overrides with file-based configuration. CLI
//! arguments have highest priority, configuration files are the base.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};
use std::path::PathBuf;

/// Merges parsed CLI arguments into loaded settings
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Create a merger by loading configuration as directed by the CLI
    ///
    /// Applies the `--env` override before loading so that the correct
    /// environment-specific configuration file is picked up, then loads
    /// either the `--config` file or the layered configuration directory.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if let Some(ref env) = cli.env {
            // The loader reads the environment variable during construction.
            unsafe {
                std::env::set_var(crate::config::Environment::ENV_VAR, env.as_str());
            }
        }

        let config = if let Some(ref path) = cli.config {
            Self::validate_config_file_access(path)?;
            ConfigLoader::with_file(path.clone()).load()?
        } else {
            ConfigLoader::new()?.load()?
        };

        Ok(Self::new(config))
    }

    fn validate_config_file_access(path: &PathBuf) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ValidationError {
                field: "config_file".to_string(),
                message: format!("Configuration file does not exist: '{}'", path.display()),
            });
        }

        if !path.is_file() {
            return Err(ConfigError::ValidationError {
                field: "config_file".to_string(),
                message: format!("Configuration path is not a file: '{}'", path.display()),
            });
        }

        match std::fs::File::open(path) {
            Ok(_) => Ok(()),
            Err(e) => Err(ConfigError::ValidationError {
                field: "config_file".to_string(),
                message: format!(
                    "Cannot read configuration file '{}': {}",
                    path.display(),
                    e
                ),
            }),
        }
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// # Errors
    /// Returns ConfigError if the merged configuration fails validation
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        self.apply_global_overrides(&mut config, cli);

        if let Some(ref command) = cli.command {
            self.apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply global flags: --verbose and --quiet adjust the log level
    fn apply_global_overrides(&self, config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    /// Apply command-specific overrides (host, port, log level for serve)
    fn apply_command_overrides(&self, config: &mut Settings, command: &Commands) {
        if let Commands::Serve {
            host,
            port,
            log_level,
            dry_run: _,
        } = command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            // Serve-level log level wins over --verbose/--quiet.
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn base_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/courtside_test".to_string();
        settings.jwt.secret = "a".repeat(32);
        settings
    }

    #[test]
    fn test_serve_overrides_applied() {
        let cli = Cli::try_parse_from([
            "courtside",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--log-level",
            "trace",
        ])
        .unwrap();

        let merger = ConfigurationMerger::new(base_settings());
        let merged = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
        assert_eq!(merged.logger.level, "trace");
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let cli = Cli::try_parse_from(["courtside", "--verbose", "serve"]).unwrap();

        let merger = ConfigurationMerger::new(base_settings());
        let merged = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(merged.logger.level, "debug");
    }

    #[test]
    fn test_quiet_lowers_log_level() {
        let cli = Cli::try_parse_from(["courtside", "--quiet", "migrate"]).unwrap();

        let merger = ConfigurationMerger::new(base_settings());
        let merged = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(merged.logger.level, "error");
    }

    #[test]
    fn test_serve_log_level_wins_over_verbose() {
        let cli =
            Cli::try_parse_from(["courtside", "--verbose", "serve", "--log-level", "warn"])
                .unwrap();

        let merger = ConfigurationMerger::new(base_settings());
        let merged = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_invalid_merged_config_rejected() {
        let cli = Cli::try_parse_from(["courtside", "serve"]).unwrap();

        // Empty database URL fails section validation.
        let merger = ConfigurationMerger::new(Settings::default());
        assert!(merger.merge_cli_args(&cli).is_err());
    }
}
