// src/probe/mod.rs
mod http;
mod tcp;

pub use http::HttpProbe;
pub use tcp::TcpProbe;

use crate::check::{CheckValue, Registry};
use crate::config::{ProbeConfig, ProbeKind};
use crate::error::ConfigError;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::info;

/// Struct-based check body, for dependencies that need state (clients,
/// addresses) rather than a closure.
#[async_trait]
pub trait Probe: Send + Sync {
    /// What the probe talks to, for logs.
    fn describe(&self) -> String;

    async fn probe(&self) -> anyhow::Result<CheckValue>;
}

/// Build the probes declared in the config file and register them in
/// declaration order.
pub fn register_configured(
    registry: &mut Registry,
    probes: &[ProbeConfig],
) -> Result<(), ConfigError> {
    for config in probes {
        let probe = build_probe(config)?;
        info!(
            "Registering check {:?} ({})",
            config.name.as_deref().unwrap_or("<unnamed>"),
            probe.describe()
        );
        registry.register_probe(config.name.as_deref(), config.timeout(), probe)?;
    }
    Ok(())
}

fn build_probe(config: &ProbeConfig) -> Result<Arc<dyn Probe>, ConfigError> {
    match &config.kind {
        ProbeKind::Http { url, expect_status } => {
            let mut probe = HttpProbe::new(url.clone())
                .map_err(|err| ConfigError::InvalidProbe(err.to_string()))?;
            if let Some(code) = expect_status {
                let status = StatusCode::from_u16(*code)
                    .map_err(|err| ConfigError::InvalidProbe(format!("{}: {}", code, err)))?;
                probe = probe.expect_status(status);
            }
            Ok(Arc::new(probe))
        }
        ProbeKind::Tcp { addr } => Ok(Arc::new(TcpProbe::new(addr.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_register_configured() {
        let probes: Vec<ProbeConfig> = serde_json::from_str(
            r#"[
                {"name": "api", "type": "http", "url": "http://localhost:1/health", "timeout_secs": 2},
                {"type": "tcp", "addr": "localhost:6379"}
            ]"#,
        )
        .unwrap();

        let mut registry = Registry::new();
        register_configured(&mut registry, &probes).unwrap();

        assert_eq!(registry.len(), 2);
        let api = registry.get(Some("api")).unwrap();
        assert_eq!(api.timeout(), Duration::from_secs(2));
        let unnamed = registry.get(None).unwrap();
        assert_eq!(unnamed.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_expected_status() {
        let probes: Vec<ProbeConfig> = serde_json::from_str(
            r#"[{"name": "api", "type": "http", "url": "http://localhost:1/", "expect_status": 1000}]"#,
        )
        .unwrap();

        let mut registry = Registry::new();
        let err = register_configured(&mut registry, &probes).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProbe(_)));
    }
}
