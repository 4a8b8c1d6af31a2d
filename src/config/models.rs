// src/config/models.rs
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    #[serde(default)]
    pub ping: PingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub checks: Vec<ProbeConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            ping: PingConfig::default(),
            metrics: MetricsConfig::default(),
            checks: Vec::new(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ping.validate()?;
        for check in &self.checks {
            check.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingConfig {
    #[serde(default = "default_ping_path")]
    pub path: String,
    #[serde(default = "default_max_secs")]
    pub max_secs: f64,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            path: default_ping_path(),
            max_secs: default_max_secs(),
        }
    }
}

impl PingConfig {
    pub fn max(&self) -> Duration {
        secs_to_duration(self.max_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.path.starts_with('/') {
            return Err(ConfigError::InvalidPath(self.path.clone()));
        }
        if self.max().is_zero() {
            return Err(ConfigError::InvalidDeadline(self.max()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
            path: default_metrics_path(),
        }
    }
}

/// A check defined in the config file rather than in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<f64>,
    #[serde(flatten)]
    pub kind: ProbeKind,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(secs_to_duration)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(timeout) = self.timeout() {
            if timeout.is_zero() {
                return Err(ConfigError::InvalidTimeout {
                    name: self.name.clone(),
                    timeout,
                });
            }
        }
        if let ProbeKind::Tcp { addr } = &self.kind {
            if addr.is_empty() {
                return Err(ConfigError::InvalidProbe(format!(
                    "tcp probe {:?} has an empty address",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProbeKind {
    Http {
        url: Url,
        #[serde(default)]
        expect_status: Option<u16>,
    },
    Tcp {
        addr: String,
    },
}

// Negative, NaN and out-of-range values collapse to zero and are caught by
// validation.
fn secs_to_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_ping_path() -> String {
    "/_ping".to_string()
}

fn default_max_secs() -> f64 {
    29.0
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}
