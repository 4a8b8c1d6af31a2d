// src/middleware/layer.rs
use super::PingService;
use crate::check::Registry;
use crate::config::PingConfig;
use crate::engine::{Classifier, Engine};
use crate::error::ConfigError;
use crate::metrics::MetricsCollector;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tracing::info;

/// Where the endpoint lives and how long a whole ping may take.
#[derive(Debug, Clone, PartialEq)]
pub struct PingOptions {
    pub path: String,
    pub max: Duration,
}

impl Default for PingOptions {
    fn default() -> Self {
        Self {
            path: "/_ping".to_string(),
            max: Engine::DEFAULT_MAX,
        }
    }
}

impl PingOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.path.starts_with('/') {
            return Err(ConfigError::InvalidPath(self.path.clone()));
        }
        if self.max.is_zero() {
            return Err(ConfigError::InvalidDeadline(self.max));
        }
        Ok(())
    }
}

impl From<&PingConfig> for PingOptions {
    fn from(config: &PingConfig) -> Self {
        Self {
            path: config.path.clone(),
            max: config.max(),
        }
    }
}

/// Tower layer that answers the ping path itself and hands every other
/// request to the wrapped service.
#[derive(Clone)]
pub struct PingLayer {
    path: Arc<str>,
    engine: Arc<Engine>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl PingLayer {
    pub fn builder() -> PingLayerBuilder {
        PingLayerBuilder::default()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }
}

impl<S> Layer<S> for PingLayer {
    type Service = PingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PingService::new(
            inner,
            self.path.clone(),
            self.engine.clone(),
            self.metrics.clone(),
        )
    }
}

/// Collects options and checks. The registry is frozen by [`build`].
///
/// [`build`]: PingLayerBuilder::build
#[derive(Default)]
pub struct PingLayerBuilder {
    options: PingOptions,
    registry: Registry,
    classifier: Classifier,
    metrics: Option<Arc<MetricsCollector>>,
    error: Option<ConfigError>,
}

impl PingLayerBuilder {
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.options.path = path.into();
        self
    }

    pub fn max(mut self, max: Duration) -> Self {
        self.options.max = max;
        self
    }

    pub fn options(mut self, options: PingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Register checks. The first error is kept and returned from `build`.
    pub fn setup<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut Registry) -> Result<(), ConfigError>,
    {
        if self.error.is_none() {
            if let Err(err) = setup(&mut self.registry) {
                self.error = Some(err);
            }
        }
        self
    }

    pub fn build(self) -> Result<PingLayer, ConfigError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.options.validate()?;

        if let Some(metrics) = &self.metrics {
            metrics.set_registered_checks(self.registry.len());
        }
        info!(
            "Ping endpoint {} with {} checks, overall deadline {:?}",
            self.options.path,
            self.registry.len(),
            self.options.max
        );

        let engine = Engine::new(Arc::new(self.registry), self.options.max)
            .with_classifier(self.classifier)
            .with_metrics(self.metrics.clone());

        Ok(PingLayer {
            path: Arc::from(self.options.path),
            engine: Arc::new(engine),
            metrics: self.metrics,
        })
    }
}
