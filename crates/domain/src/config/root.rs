use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::output::OutputConfig;
use super::resolver::ResolverConfig;
use crate::DnsServerAddr;

const LOCAL_CONFIG_FILE: &str = "tcpdns.toml";

/// Main configuration structure for tcpdns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Server, timeout and worker settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Where results and diagnostics go
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. tcpdns.toml in current directory
    /// 3. Default configuration
    ///
    /// Command-line overrides are applied on top of whichever was found.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG_FILE).exists() {
            Self::from_file(LOCAL_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(server) = overrides.dns_server {
            self.resolver.server = server;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.resolver.timeout_secs = timeout;
        }
        if let Some(workers) = overrides.workers {
            self.resolver.workers = workers;
        }
        if overrides.verbose {
            self.output.verbose = true;
        }
        if let Some(file) = overrides.output_file {
            self.output.file = Some(file);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.workers == 0 {
            return Err(ConfigError::Validation(
                "Worker count must be at least 1".to_string(),
            ));
        }

        self.resolver.timeout()?;

        if !self.logging.is_valid_level() {
            return Err(ConfigError::Validation(format!(
                "Unknown log level '{}'",
                self.logging.level
            )));
        }

        if let Some(file) = &self.output.file {
            if file.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Output file path cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_server: Option<DnsServerAddr>,
    pub timeout_secs: Option<f64>,
    pub workers: Option<usize>,
    pub verbose: bool,
    pub output_file: Option<String>,
    pub log_level: Option<String>,
}
