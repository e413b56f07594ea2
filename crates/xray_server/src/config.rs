//! Server configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Environment variable names recognised by [`ServerConfig::apply_env`].
pub const ENV_HOST: &str = "XRAY_SERVER_HOST";
pub const ENV_PORT: &str = "XRAY_SERVER_PORT";
pub const ENV_LOG_LEVEL: &str = "XRAY_LOG_LEVEL";
pub const ENV_ENVIRONMENT: &str = "XRAY_ENV";
pub const ENV_DATA_FILE: &str = "XRAY_DATA_FILE";
pub const ENV_SHUTDOWN_TIMEOUT: &str = "XRAY_SHUTDOWN_TIMEOUT_SECS";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    #[error("Invalid log level: {0}. Must be one of: off, error, warn, info, debug, trace")]
    InvalidLogLevel(String),

    #[error("Invalid environment: {0}. Must be one of: development, staging, production")]
    InvalidEnvironment(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Parse a log level name such as `info` or `WARN`. `off` silences logging.
///
/// Blank strings and numeric levels are rejected even though
/// [`LevelFilter`]'s own parser accepts them.
pub fn parse_log_level(s: &str) -> Result<LevelFilter, ConfigError> {
    let name = s.trim();
    if name.is_empty() || name.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidLogLevel(s.to_string()));
    }
    LevelFilter::from_str(name).map_err(|_| ConfigError::InvalidLogLevel(s.to_string()))
}

/// Deployment environment. Production switches logging to JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Staging,
        Environment::Production,
    ];

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted spellings, canonical name first
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Environment::Development => &["development", "dev"],
            Environment::Staging => &["staging", "stage"],
            Environment::Production => &["production", "prod"],
        }
    }

    /// Check if this is a production environment
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|env| env.aliases().iter().any(|a| a.eq_ignore_ascii_case(wanted)))
            .ok_or_else(|| ConfigError::InvalidEnvironment(s.to_string()))
    }
}

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Server configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Default verbosity, overridden by `RUST_LOG`
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LevelFilter,
    /// Environment (development, staging, production)
    pub environment: Environment,
    /// Seconds to wait for in-flight requests after a shutdown signal
    pub shutdown_timeout_secs: u64,
    /// Element dataset to load instead of the bundled one
    pub data_file: Option<PathBuf>,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_log_level(&s).map_err(serde::de::Error::custom)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            log_level: LevelFilter::INFO,
            environment: Environment::Development,
            shutdown_timeout_secs: 30,
            data_file: None,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// The result is not validated: environment variables and CLI flags may
    /// still replace a bad value. [`build_config`] validates the merged result.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override fields from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Override fields from an environment lookup. Only variables that are
    /// set replace the current value.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("{}={} is not a port", ENV_PORT, port)))?;
        }

        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = parse_log_level(&log_level)?;
        }

        if let Some(env) = lookup(ENV_ENVIRONMENT) {
            self.environment = Environment::from_str(&env)?;
        }

        if let Some(path) = lookup(ENV_DATA_FILE) {
            self.data_file = Some(PathBuf::from(path));
        }

        if let Some(timeout) = lookup(ENV_SHUTDOWN_TIMEOUT) {
            self.shutdown_timeout_secs = timeout.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!(
                    "{}={} is not a number of seconds",
                    ENV_SHUTDOWN_TIMEOUT, timeout
                ))
            })?;
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = parse_log_level(log_level)?;
        }
        if let Some(data_file) = &cli.data_file {
            self.data_file = Some(data_file.clone());
        }
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Host address override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Log level override
    pub log_level: Option<String>,
    /// Element dataset override
    pub data_file: Option<PathBuf>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ServerConfig, ConfigError> {
    build_config_from(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an injectable environment lookup
pub fn build_config_from<F>(cli: &CliArgs, lookup: F) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if let Some(config_path) = &cli.config_file {
        ServerConfig::from_file(config_path)?
    } else {
        ServerConfig::default()
    };

    config.apply_env_from(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}
