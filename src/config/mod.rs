// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a file (YAML or JSON)
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    parse_config(&contents, is_yaml(path))
}

pub fn parse_config(contents: &str, yaml: bool) -> Result<Config> {
    let config: Config = if yaml {
        serde_yaml::from_str(contents).context("Failed to parse YAML config")?
    } else {
        serde_json::from_str(contents).context("Failed to parse JSON config")?
    };

    config.validate()?;
    Ok(config)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = parse_config("{}", false).unwrap();
        assert_eq!(config.ping.path, "/_ping");
        assert_eq!(config.ping.max(), Duration::from_secs(29));
        assert_eq!(config.listen.port(), 8080);
        assert!(!config.metrics.enabled);
        assert!(config.checks.is_empty());
    }

    #[test]
    fn test_yaml_with_probes() {
        let yaml = r#"
listen: "127.0.0.1:3000"
ping:
  path: /_health
  max_secs: 5
metrics:
  enabled: true
checks:
  - name: api
    type: http
    url: http://localhost:8081/health
    timeout_secs: 0.5
  - name: redis
    type: tcp
    addr: localhost:6379
  - type: tcp
    addr: localhost:5432
"#;
        let config = parse_config(yaml, true).unwrap();
        assert_eq!(config.ping.path, "/_health");
        assert_eq!(config.ping.max(), Duration::from_secs(5));
        assert!(config.metrics.enabled);
        assert_eq!(config.checks.len(), 3);

        let api = &config.checks[0];
        assert_eq!(api.name.as_deref(), Some("api"));
        assert_eq!(api.timeout(), Some(Duration::from_millis(500)));
        assert!(matches!(&api.kind, ProbeKind::Http { url, .. } if url.path() == "/health"));

        assert!(config.checks[2].name.is_none());
        assert!(config.checks[2].timeout().is_none());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse_config(r#"{"ping":{"path":"_ping"}}"#, false).is_err());
        assert!(parse_config(r#"{"ping":{"max_secs":0}}"#, false).is_err());
        assert!(parse_config(
            r#"{"checks":[{"type":"tcp","addr":"db:5432","timeout_secs":-1}]}"#,
            false
        )
        .is_err());
    }

    #[tokio::test]
    async fn test_missing_file() {
        assert!(load_config("/nonexistent/ping.yaml").await.is_err());
    }
}
