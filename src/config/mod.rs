//! Configuration management for swanctl
//!
//! Settings are layered:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use swan_registry::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Registry at: {}", config.server.base_url);
//! ```
//!
//! # Environment Variables
//!
//! Any key can be overridden with `SWAN__<section>__<key>`:
//! - `SWAN__SERVER__BASE_URL=https://registry.example.com`
//! - `SWAN__HTTP__REQUEST_TIMEOUT_SECS=5`
//! - `SWAN__FORM__STRICT_IMEI=true`
//!
//! # Configuration File
//!
//! Read from `config/swan.toml` unless `SWAN_CONFIG` points elsewhere.

mod models;
mod sources;
mod validation;

pub use models::{Config, FormConfig, HttpConfig, ServerConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
