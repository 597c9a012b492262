//! Command handlers for CLI operations
//!
//! Separates command execution logic from parsing and validation.

pub mod migrate;
pub mod serve;

pub use migrate::MigrateCommandHandler;
pub use serve::ServeCommandHandler;
