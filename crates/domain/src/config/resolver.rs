use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::errors::ConfigError;
use crate::DnsServerAddr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub server: DnsServerAddr,

    /// Per-query timeout in seconds; fractions are allowed.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,

    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            server: DnsServerAddr::default(),
            timeout_secs: default_timeout_secs(),
            workers: default_workers(),
        }
    }
}

impl ResolverConfig {
    /// The per-query deadline. Fails for values that are not a positive,
    /// representable, non-zero duration.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        match Duration::try_from_secs_f64(self.timeout_secs) {
            Ok(timeout) if !timeout.is_zero() => Ok(timeout),
            _ => Err(ConfigError::Validation(format!(
                "Timeout must be a positive number of seconds, got {}",
                self.timeout_secs
            ))),
        }
    }
}

fn default_timeout_secs() -> f64 {
    5.0
}

fn default_workers() -> usize {
    1
}
