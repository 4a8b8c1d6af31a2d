// src/metrics/collector.rs
use anyhow::Result;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;
use std::time::Duration;

/// Label used for the unnamed check.
const UNNAMED_CHECK: &str = "_default";

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<MetricsCollector>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(MetricsCollector::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<MetricsCollector> {
        self.collector.clone()
    }

    pub fn gather(&self) -> Result<Vec<u8>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(buffer)
    }
}

pub struct MetricsCollector {
    // Request metrics
    pub ping_requests_total: IntCounterVec,
    pub ping_fallbacks_total: IntCounter,

    // Check metrics
    pub check_outcomes_total: IntCounterVec,
    pub check_duration_seconds: HistogramVec,
    pub registered_checks: IntGauge,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        // Request metrics
        let ping_requests_total = IntCounterVec::new(
            Opts::new("ping_requests_total", "Total number of ping requests"),
            &["status"],
        )?;
        registry.register(Box::new(ping_requests_total.clone()))?;

        let ping_fallbacks_total = IntCounter::new(
            "ping_fallbacks_total",
            "Ping requests answered with the fallback document",
        )?;
        registry.register(Box::new(ping_fallbacks_total.clone()))?;

        // Check metrics
        let check_outcomes_total = IntCounterVec::new(
            Opts::new("ping_check_outcomes_total", "Check outcomes by kind"),
            &["check", "outcome"],
        )?;
        registry.register(Box::new(check_outcomes_total.clone()))?;

        let check_duration_seconds = HistogramVec::new(
            HistogramOpts::new("ping_check_duration_seconds", "Check duration in seconds"),
            &["check"],
        )?;
        registry.register(Box::new(check_duration_seconds.clone()))?;

        let registered_checks =
            IntGauge::new("ping_registered_checks", "Number of registered checks")?;
        registry.register(Box::new(registered_checks.clone()))?;

        Ok(Self {
            ping_requests_total,
            ping_fallbacks_total,
            check_outcomes_total,
            check_duration_seconds,
            registered_checks,
        })
    }

    pub fn record_request(&self, status: &str) {
        self.ping_requests_total.with_label_values(&[status]).inc();
    }

    pub fn record_fallback(&self) {
        self.ping_fallbacks_total.inc();
        self.record_request("fallback");
    }

    pub fn record_check(&self, check: Option<&str>, outcome: &str, duration: Duration) {
        let check = check.unwrap_or(UNNAMED_CHECK);
        self.check_outcomes_total
            .with_label_values(&[check, outcome])
            .inc();

        self.check_duration_seconds
            .with_label_values(&[check])
            .observe(duration.as_secs_f64());
    }

    pub fn set_registered_checks(&self, count: usize) {
        self.registered_checks.set(count as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_contains_recorded_metrics() {
        let registry = MetricsRegistry::new().unwrap();
        let collector = registry.collector();

        collector.record_request("ok");
        collector.record_fallback();
        collector.record_check(Some("db"), "value", Duration::from_millis(3));
        collector.record_check(None, "timeout", Duration::from_millis(1000));
        collector.set_registered_checks(2);

        let text = String::from_utf8(registry.gather().unwrap()).unwrap();
        assert!(text.contains(r#"ping_requests_total{status="ok"} 1"#));
        assert!(text.contains(r#"ping_requests_total{status="fallback"} 1"#));
        assert!(text.contains("ping_fallbacks_total 1"));
        assert!(text.contains(r#"ping_check_outcomes_total{check="db",outcome="value"} 1"#));
        assert!(text.contains(r#"ping_check_outcomes_total{check="_default",outcome="timeout"} 1"#));
        assert!(text.contains("ping_registered_checks 2"));
    }
}
