//! Configuration module for the video-share server.
//!
//! This module handles loading and validating configuration from TOML files.
//! Configuration can be loaded from a file path or from default locations.
//!
//! # Configuration Sources (in order of priority)
//! 1. `config.local.toml` - Local overrides (gitignored)
//! 2. `config.toml` - Main configuration file
//!
//! # Example
//! ```rust,ignore
//! let config = Config::load("config.toml")?;
//! println!("Server will listen on {}:{}", config.server.host, config.server.port);
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub upload: UploadConfig,
    pub media_host: MediaHostConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind the API to
    pub host: String,
    /// Port for the API
    pub port: u16,
    /// Request timeout in seconds
    pub request_timeout: u64,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Base directory for all data (RocksDB lives in data_dir/rocksdb)
    pub data_dir: PathBuf,
}

/// Upload configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Maximum file size accepted in a multipart request (bytes)
    pub max_upload_size: u64,
}

/// External media host configuration
///
/// Uploaded files are forwarded to this service, which stores them and
/// returns a durable URL (plus a duration for video files).
#[derive(Debug, Clone, Deserialize)]
pub struct MediaHostConfig {
    /// Base URL of the media host, without trailing slash
    pub endpoint: String,
    /// Optional bearer token sent with every upload
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl MediaHostConfig {
    /// Full URL of the upload endpoint
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.endpoint)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Config {
    /// Load configuration from a file path
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Tries to load from:
    /// 1. `config.local.toml` (if exists)
    /// 2. `config.toml`
    ///
    /// # Errors
    /// Returns `ConfigError` if no configuration file is found
    pub fn load_default() -> Result<Self, ConfigError> {
        // Try local config first
        if Path::new("config.local.toml").exists() {
            return Self::load("config.local.toml");
        }

        // Fall back to main config
        if Path::new("config.toml").exists() {
            return Self::load("config.toml");
        }

        Err(ConfigError::ValidationError(
            "No configuration file found. Expected config.toml or config.local.toml".to_string(),
        ))
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.request_timeout == 0 {
            return Err(ConfigError::ValidationError(
                "server.request_timeout must be greater than 0".to_string(),
            ));
        }

        // Validate upload size
        if self.upload.max_upload_size < 1024 {
            return Err(ConfigError::ValidationError(
                "max_upload_size must be at least 1024 bytes".to_string(),
            ));
        }

        // Validate media host endpoint doesn't have trailing slash
        if self.media_host.endpoint.ends_with('/') {
            return Err(ConfigError::ValidationError(
                "media_host.endpoint should not have a trailing slash".to_string(),
            ));
        }

        if self.media_host.endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "media_host.endpoint must be set".to_string(),
            ));
        }

        if self.media_host.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "media_host.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                request_timeout: 30,
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("/data"),
            },
            upload: UploadConfig {
                max_upload_size: 10 * 1024 * 1024,
            },
            media_host: MediaHostConfig {
                endpoint: "http://media.example.com".to_string(),
                api_key: None,
                timeout_seconds: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_upload_url() {
        let config = test_config();
        assert_eq!(
            config.media_host.upload_url(),
            "http://media.example.com/upload"
        );
    }

    #[test]
    fn test_trailing_slash_rejected() {
        let mut config = test_config();
        config.media_host.endpoint = "http://media.example.com/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_request_timeout_rejected() {
        let mut config = test_config();
        config.server.request_timeout = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tiny_upload_size_rejected() {
        let mut config = test_config();
        config.upload.max_upload_size = 100;
        assert!(config.validate().is_err());
    }
}
