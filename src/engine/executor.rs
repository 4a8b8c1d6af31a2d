// src/engine/executor.rs
use super::{CheckRun, Classifier, Outcome};
use crate::check::{Check, Registry};
use crate::error::{CheckError, PingError};
use crate::metrics::MetricsCollector;
use crate::report::{aggregate, Report};
use chrono::Utc;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Runs every registered check under its own timeout, and the whole batch
/// under an overall deadline.
pub struct Engine {
    registry: Arc<Registry>,
    max: Duration,
    classifier: Classifier,
    metrics: Option<Arc<MetricsCollector>>,
}

impl Engine {
    pub const DEFAULT_MAX: Duration = Duration::from_secs(29);

    pub fn new(registry: Arc<Registry>, max: Duration) -> Self {
        Self {
            registry,
            max,
            classifier: Classifier::default(),
            metrics: None,
        }
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_metrics(mut self, metrics: Option<Arc<MetricsCollector>>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Run the checks and build the status document.
    pub async fn evaluate(&self) -> Result<Report, PingError> {
        let runs = self.run().await?;

        for run in &runs {
            if self.classifier.is_failure(&run.outcome) {
                match &run.outcome {
                    Outcome::Error(err) => warn!(check = ?run.name, error = %err, "Check failed"),
                    outcome => warn!(check = ?run.name, outcome = outcome.kind(), "Check failed"),
                }
            }
        }

        Ok(aggregate(&runs, &self.classifier, Utc::now()))
    }

    /// Run every check concurrently. Outcomes come back in registration
    /// order. Hitting the overall deadline aborts the checks still running
    /// and fails the whole batch.
    pub async fn run(&self) -> Result<Vec<CheckRun>, PingError> {
        match tokio::time::timeout(self.max, self.run_all()).await {
            Ok(runs) => runs,
            Err(_) => {
                warn!("Overall deadline of {:?} exceeded", self.max);
                Err(PingError::DeadlineExceeded(self.max))
            }
        }
    }

    async fn run_all(&self) -> Result<Vec<CheckRun>, PingError> {
        let checks: Vec<Arc<Check>> = self.registry.iter().cloned().collect();

        // Dropping the set (deadline fired) aborts whatever is still in flight.
        let mut set = JoinSet::new();
        for (index, check) in checks.iter().enumerate() {
            let check = check.clone();
            set.spawn(async move { (index, run_check(&check).await) });
        }

        let mut slots: Vec<Option<CheckRun>> = checks.iter().map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, run)) => {
                    if let Some(metrics) = &self.metrics {
                        metrics.record_check(run.name.as_deref(), run.outcome.kind(), run.elapsed);
                    }
                    slots[index] = Some(run);
                }
                Err(err) => {
                    return Err(PingError::TaskLost {
                        name: None,
                        reason: err.to_string(),
                    });
                }
            }
        }

        slots
            .into_iter()
            .zip(&checks)
            .map(|(slot, check)| {
                slot.ok_or_else(|| PingError::TaskLost {
                    name: check.name().map(str::to_owned),
                    reason: "no outcome recorded".to_string(),
                })
            })
            .collect()
    }
}

/// Run one check under its own timeout. Errors, panics and timeouts all end
/// up as an [`Outcome`]; nothing escapes.
///
/// Work that completes only after its budget has elapsed is a timeout too,
/// whichever of the two the task happened to observe first.
pub async fn run_check(check: &Check) -> CheckRun {
    let budget = check.timeout();
    let start = Instant::now();
    let deadline = tokio::time::sleep(budget);
    tokio::pin!(deadline);
    let work = AssertUnwindSafe(async { check.call().await }).catch_unwind();

    let outcome = tokio::select! {
        biased;
        _ = &mut deadline => Outcome::Timeout(budget),
        finished = work => match finished {
            Ok(result) => Outcome::from_result(result),
            Err(panic) => Outcome::Error(CheckError::Panicked(panic_message(panic.as_ref()))),
        },
    };
    let elapsed = start.elapsed();
    let outcome = if elapsed >= budget {
        Outcome::Timeout(budget)
    } else {
        outcome
    };

    debug!(
        check = ?check.name(),
        outcome = outcome.kind(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Check finished"
    );

    CheckRun::new(check.name(), outcome, elapsed)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
