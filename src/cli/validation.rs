//! Custom value parsers for CLI arguments
//!
//! These validators run during clap parsing and produce user-facing
//! error messages for values clap cannot check on its own.

use std::fs;
use std::path::PathBuf;

/// Validate port number is within valid range (1-65535)
pub fn validate_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str.parse().map_err(|_| {
        format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            port_str
        )
    })?;

    if port == 0 {
        return Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string());
    }

    Ok(port)
}

/// Validate that a configuration file exists and is readable
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!(
            "Cannot read configuration file '{}': {}",
            path_str, e
        )),
    }
}

/// Validate rollback steps is a positive number with a safety cap
pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str.parse().map_err(|_| {
        format!(
            "Rollback steps must be a valid positive number, got: '{}'",
            steps_str
        )
    })?;

    if steps == 0 {
        return Err("Rollback steps must be greater than 0".to_string());
    }

    if steps > 100 {
        return Err("Rollback steps cannot exceed 100 for safety reasons".to_string());
    }

    Ok(steps)
}

/// Validate host address format (basic validation)
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }

    if host.contains(' ') {
        return Err("Host address cannot contain spaces".to_string());
    }

    if host == "localhost" || host == "0.0.0.0" || host.starts_with("127.") {
        return Ok(host.to_string());
    }

    // Basic IPv4 validation
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        let parts: Vec<&str> = host.split('.').collect();
        if parts.len() == 4 {
            for part in &parts {
                match part.parse::<u16>() {
                    Ok(octet) if octet <= 255 => {}
                    _ => {
                        return Err(format!(
                            "Invalid IPv4 address: '{}'. Each octet must be 0-255.",
                            host
                        ));
                    }
                }
            }
            return Ok(host.to_string());
        }
        return Err(format!("Invalid IPv4 address format: '{}'", host));
    }

    // Hostnames: letters, digits, dots and hyphens
    if host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Ok(host.to_string());
    }

    Err(format!("Invalid host address: '{}'", host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_port() {
        assert_eq!(validate_port("8080"), Ok(8080));
        assert_eq!(validate_port("1"), Ok(1));
        assert_eq!(validate_port("65535"), Ok(65535));
        assert!(validate_port("0").is_err());
        assert!(validate_port("65536").is_err());
        assert!(validate_port("abc").is_err());
    }

    #[test]
    fn test_validate_rollback_steps() {
        assert_eq!(validate_rollback_steps("1"), Ok(1));
        assert_eq!(validate_rollback_steps("100"), Ok(100));
        assert!(validate_rollback_steps("0").is_err());
        assert!(validate_rollback_steps("101").is_err());
        assert!(validate_rollback_steps("-1").is_err());
    }

    #[test]
    fn test_validate_host_address() {
        assert!(validate_host_address("localhost").is_ok());
        assert!(validate_host_address("0.0.0.0").is_ok());
        assert!(validate_host_address("127.0.0.1").is_ok());
        assert!(validate_host_address("192.168.1.100").is_ok());
        assert!(validate_host_address("api.example.com").is_ok());
        assert!(validate_host_address("").is_err());
        assert!(validate_host_address("has space").is_err());
        assert!(validate_host_address("300.1.1.1").is_err());
    }

    #[test]
    fn test_validate_config_file_path() {
        assert!(validate_config_file_path("/nonexistent/config.toml").is_err());

        let file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        let path = file.path().to_str().unwrap().to_string();
        assert!(validate_config_file_path(&path).is_ok());
    }
}
