//! CLI argument parsing with clap
//!
//! Defines the command-line interface structure, including all commands,
//! arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// Include shadow-rs generated build information
use shadow_rs::shadow;
shadow!(build);

/// Sports facility reservation platform
#[derive(Parser, Debug)]
#[command(name = "courtside")]
#[command(about = "Sports facility reservation API server")]
#[command(long_about = "
Courtside is a reservation platform for sports facilities. It exposes a
RESTful API for court availability, reservations with players and rented
equipment, a product registry, and an administrative dashboard.

EXAMPLES:
    # Start the server with default configuration
    courtside serve

    # Start server on custom host and port
    courtside serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    courtside --config /path/to/config.toml serve

    # Run in development mode with verbose logging
    courtside --env development --verbose serve

    # Check configuration without starting server
    courtside serve --dry-run

    # Run database migrations
    courtside migrate

    # Preview pending migrations
    courtside migrate --dry-run

    # Rollback last 2 migrations
    courtside migrate --rollback 2

For more information about configuration options, see the documentation.
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Specify a custom configuration file to use instead of the layered
    /// configuration directory. The file must be TOML, exist and be readable.
    ///
    /// Example: --config /etc/courtside/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Force the application to use a specific environment configuration.
    /// This affects which configuration files are loaded and default settings.
    ///
    /// Available values: development (dev), test, staging (stage), production (prod)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Raises log output to debug level. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Launches the HTTP server with the configured settings. The server
    /// binds to the specified host and port, builds the database connection
    /// pool, and begins accepting requests.
    ///
    /// Examples:
    ///   courtside serve                           # Start with defaults
    ///   courtside serve --host 0.0.0.0 --port 80  # Bind to all interfaces on port 80
    ///   courtside serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept
        /// connections from any interface.
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Must be between 1 and 65535. Ports below 1024 typically require
        /// root privileges.
        ///
        /// Default: 3000
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Overrides both configuration file settings and the global
        /// --verbose/--quiet flags for this server instance.
        ///
        /// Available levels: error, warn, info, debug, trace
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Performs a complete configuration validation check without
        /// starting the server. Returns exit code 0 if valid.
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    ///
    /// Connects to the configured database and applies or rolls back
    /// schema changes.
    ///
    /// Examples:
    ///   courtside migrate                    # Apply all pending migrations
    ///   courtside migrate --dry-run          # Show pending migrations without applying
    ///   courtside migrate --rollback 3       # Rollback the last 3 migrations
    Migrate {
        /// Show pending migrations without applying
        ///
        /// Lists migrations that would be applied without running them.
        /// Cannot be used with --rollback.
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to rollback
        ///
        /// Reverts the specified number of most recent migrations. Use with
        /// caution as this can result in data loss. Must be between 1 and
        /// 100. Cannot be used with --dry-run.
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl Environment {
    /// Canonical name used by the configuration layer
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// Validate argument combinations beyond what clap enforces
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref command) = self.command {
            match command {
                Commands::Serve {
                    host,
                    port,
                    log_level: _,
                    dry_run: _,
                } => {
                    if let (Some(host_addr), Some(port_num)) = (host, port)
                        && host_addr == "0.0.0.0"
                        && *port_num < 1024
                    {
                        return Err(
                            "Binding to 0.0.0.0 on a privileged port (< 1024) typically requires root privileges"
                                .to_string(),
                        );
                    }
                }
                Commands::Migrate { dry_run, rollback } => {
                    if *dry_run && rollback.is_some() {
                        return Err("Cannot use --dry-run and --rollback together".to_string());
                    }
                }
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli =
            Cli::try_parse_from(["courtside", "serve", "--host", "0.0.0.0", "--port", "8080"])
                .unwrap();
        match cli.command {
            Some(Commands::Serve { host, port, .. }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("Expected serve command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_no_command_defaults_to_serve() {
        let cli = Cli::try_parse_from(["courtside"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_parse_migrate_rollback() {
        let cli = Cli::try_parse_from(["courtside", "migrate", "--rollback", "2"]).unwrap();
        match cli.command {
            Some(Commands::Migrate { dry_run, rollback }) => {
                assert!(!dry_run);
                assert_eq!(rollback, Some(2));
            }
            other => panic!("Expected migrate command, got {:?}", other),
        }
    }

    #[test]
    fn test_conflicting_migrate_flags_rejected_by_clap() {
        let result =
            Cli::try_parse_from(["courtside", "migrate", "--dry-run", "--rollback", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_port_rejected() {
        let result = Cli::try_parse_from(["courtside", "serve", "--port", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_env_aliases() {
        let cli = Cli::try_parse_from(["courtside", "--env", "prod", "serve"]).unwrap();
        assert!(matches!(cli.env, Some(Environment::Production)));

        let cli = Cli::try_parse_from(["courtside", "--env", "dev", "serve"]).unwrap();
        assert!(matches!(cli.env, Some(Environment::Development)));
    }

    #[test]
    fn test_validate_privileged_port_warning() {
        let cli = Cli {
            command: Some(Commands::Serve {
                host: Some("0.0.0.0".to_string()),
                port: Some(80),
                log_level: None,
                dry_run: false,
            }),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };
        assert!(cli.validate().is_err());
    }
}
