//! Configuration settings structures for courtside
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "courtside".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_keep_alive_timeout() -> u64 {
    75
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/courtside.log".to_string()
}

fn default_jwt_secret() -> String {
    String::new()
}

fn default_access_token_expiration() -> i64 {
    1 // 1 hour
}

fn default_refresh_token_expiration() -> i64 {
    168 // 7 days (168 hours)
}

fn default_opening_hour() -> u32 {
    8
}

fn default_closing_hour() -> u32 {
    22
}

fn default_reset_code_length() -> u32 {
    6
}

fn default_reset_code_expiration_minutes() -> i64 {
    15
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Keep-alive timeout in seconds
    #[serde(default = "default_keep_alive_timeout")]
    pub keep_alive_timeout: u64,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            keep_alive_timeout: default_keep_alive_timeout(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Diesel database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Whether to automatically run pending migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,
}

impl DatabaseConfig {
    /// Validates the database configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL cannot be empty",
            ));
        }

        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL must be a postgres:// connection string",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Connection pool must allow at least one connection",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Minimum connections cannot exceed maximum connections",
            ));
        }

        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

// ============================================================================
// JWT Configuration
// ============================================================================

/// JWT authentication configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing JWT tokens
    /// IMPORTANT: This should be a strong, random string in production
    /// and should be kept secret (use environment variables)
    #[serde(default = "default_jwt_secret")]
    pub secret: String,

    /// Access token expiration time in hours
    #[serde(default = "default_access_token_expiration")]
    pub access_token_expiration: i64,

    /// Refresh token expiration time in hours
    #[serde(default = "default_refresh_token_expiration")]
    pub refresh_token_expiration: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_jwt_secret(),
            access_token_expiration: default_access_token_expiration(),
            refresh_token_expiration: default_refresh_token_expiration(),
        }
    }
}

impl JwtConfig {
    /// Validates the JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::validation(
                "jwt.secret",
                "JWT secret cannot be empty",
            ));
        }

        if self.secret.len() < 32 {
            return Err(ConfigError::validation(
                "jwt.secret",
                "JWT secret should be at least 32 characters for security",
            ));
        }

        if self.access_token_expiration <= 0 {
            return Err(ConfigError::validation(
                "jwt.access_token_expiration",
                "Access token expiration must be positive",
            ));
        }

        if self.refresh_token_expiration <= 0 {
            return Err(ConfigError::validation(
                "jwt.refresh_token_expiration",
                "Refresh token expiration must be positive",
            ));
        }

        if self.access_token_expiration >= self.refresh_token_expiration {
            return Err(ConfigError::validation(
                "jwt",
                "Refresh token expiration should be longer than access token expiration",
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Facility Configuration
// ============================================================================

/// Booking rules for the facility: daily opening window and password-reset
/// code policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityConfig {
    /// First bookable hour of the day (slots start here)
    #[serde(default = "default_opening_hour")]
    pub opening_hour: u32,

    /// Hour the facility closes (last slot ends here)
    #[serde(default = "default_closing_hour")]
    pub closing_hour: u32,

    /// Number of digits in a password reset code
    #[serde(default = "default_reset_code_length")]
    pub reset_code_length: u32,

    /// Minutes before a password reset code expires
    #[serde(default = "default_reset_code_expiration_minutes")]
    pub reset_code_expiration_minutes: i64,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            opening_hour: default_opening_hour(),
            closing_hour: default_closing_hour(),
            reset_code_length: default_reset_code_length(),
            reset_code_expiration_minutes: default_reset_code_expiration_minutes(),
        }
    }
}

impl FacilityConfig {
    /// Validates the facility configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.opening_hour >= self.closing_hour {
            return Err(ConfigError::validation(
                "facility.opening_hour",
                "Opening hour must be before closing hour",
            ));
        }

        if self.closing_hour > 24 {
            return Err(ConfigError::validation(
                "facility.closing_hour",
                "Closing hour cannot exceed 24",
            ));
        }

        if self.reset_code_length < 4 || self.reset_code_length > 10 {
            return Err(ConfigError::validation(
                "facility.reset_code_length",
                "Reset code length must be between 4 and 10 digits",
            ));
        }

        if self.reset_code_expiration_minutes <= 0 {
            return Err(ConfigError::validation(
                "facility.reset_code_expiration_minutes",
                "Reset code expiration must be positive",
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Log file path
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Output format: "text" or "json"
    #[serde(default)]
    pub format: LogFormat,

    /// Whether to append to an existing file
    #[serde(default = "default_true")]
    pub append: bool,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            format: LogFormat::default(),
            append: default_true(),
        }
    }
}

/// Logger settings loaded from configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Base log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

// ============================================================================
// Root Settings
// ============================================================================

/// Root configuration for the application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// JWT authentication configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Facility booking rules
    #[serde(default)]
    pub facility: FacilityConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}

impl Settings {
    /// Validates every configuration section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.jwt.validate()?;
        self.facility.validate()?;
        Ok(())
    }

    /// Builds a LoggerConfig for logger initialization from these settings
    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: self.logger.level.clone(),
            console: ConsoleConfig {
                enabled: self.logger.console.enabled,
                colored: self.logger.console.colored,
            },
            file: FileConfig {
                enabled: self.logger.file.enabled,
                path: self.logger.file.path.clone().into(),
                format: self.logger.file.format,
                append: self.logger.file.append,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.address(), "127.0.0.1:3000");
        assert_eq!(settings.facility.opening_hour, 8);
        assert_eq!(settings.facility.closing_hour, 22);
        assert_eq!(settings.facility.reset_code_length, 6);
        assert_eq!(settings.jwt.access_token_expiration, 1);
        assert_eq!(settings.jwt.refresh_token_expiration, 168);
    }

    #[test]
    fn test_jwt_validation() {
        let mut jwt = JwtConfig {
            secret: "a".repeat(32),
            ..JwtConfig::default()
        };
        assert!(jwt.validate().is_ok());

        jwt.secret = "short".to_string();
        assert!(jwt.validate().is_err());

        jwt.secret = "a".repeat(32);
        jwt.access_token_expiration = 200;
        assert!(jwt.validate().is_err());
    }

    #[test]
    fn test_database_validation() {
        let mut db = DatabaseConfig {
            url: "postgres://localhost/courtside".to_string(),
            ..DatabaseConfig::default()
        };
        assert!(db.validate().is_ok());

        db.url = "mysql://localhost/courtside".to_string();
        assert!(db.validate().is_err());

        db.url = String::new();
        assert!(db.validate().is_err());
    }

    #[test]
    fn test_facility_validation() {
        let mut facility = FacilityConfig::default();
        assert!(facility.validate().is_ok());

        facility.opening_hour = 23;
        assert!(facility.validate().is_err());

        facility = FacilityConfig {
            closing_hour: 25,
            ..FacilityConfig::default()
        };
        assert!(facility.validate().is_err());
    }

    #[test]
    fn test_settings_deserialize_from_toml() {
        let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [database]
            url = "postgres://localhost/courtside"

            [facility]
            opening_hour = 9
            closing_hour = 21

            [logger]
            level = "debug"
        "#;

        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.server.address(), "0.0.0.0:8080");
        assert_eq!(settings.facility.opening_hour, 9);
        assert_eq!(settings.logger.level, "debug");
        // Unspecified sections keep their defaults
        assert_eq!(settings.jwt.access_token_expiration, 1);
    }
}
