// src/report/aggregator.rs
use super::{Report, Status};
use crate::engine::{CheckRun, Classifier};
use chrono::{DateTime, Utc};

/// Fold classified outcomes into a status document.
///
/// Any failure, named or not, makes the whole document unhealthy. The
/// unnamed check never shows up under a key of its own.
pub fn aggregate(runs: &[CheckRun], classifier: &Classifier, now: DateTime<Utc>) -> Report {
    let failed = runs.iter().any(|run| classifier.is_failure(&run.outcome));
    let status = if failed { Status::Failures } else { Status::Ok };

    let mut report = Report::new(now, status);
    for run in runs {
        let Some(name) = run.name.as_deref() else {
            continue;
        };

        if classifier.is_failure(&run.outcome) {
            if classifier.is_timeout(&run.outcome) {
                report.timeouts.push(name.to_string());
            } else {
                report.failures.push(name.to_string());
            }
        } else if let Some(rendered) = run.outcome.value().and_then(|value| value.render()) {
            report.values.insert(name.to_string(), rendered);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::CheckValue;
    use crate::engine::Outcome;
    use crate::error::CheckError;
    use std::time::Duration;

    fn run(name: Option<&str>, outcome: Outcome) -> CheckRun {
        CheckRun::new(name, outcome, Duration::from_millis(1))
    }

    fn text(s: &str) -> Outcome {
        Outcome::Value(CheckValue::Text(s.into()))
    }

    #[test]
    fn test_all_passing() {
        let runs = vec![run(Some("db"), text("up")), run(Some("queue"), text("up"))];
        let report = aggregate(&runs, &Classifier::default(), Utc::now());

        assert_eq!(report.status, Status::Ok);
        assert_eq!(report.values.len(), 2);
        assert!(report.failures.is_empty());
        assert!(report.timeouts.is_empty());
    }

    #[test]
    fn test_failures_and_timeouts_are_separated() {
        let runs = vec![
            run(Some("db"), text("ok")),
            run(Some("long"), Outcome::Timeout(Duration::from_millis(1))),
            run(Some("raise"), Outcome::Error(CheckError::Failed(anyhow::anyhow!("nope")))),
            run(Some("fail"), Outcome::BooleanFailure),
        ];
        let report = aggregate(&runs, &Classifier::default(), Utc::now());

        assert_eq!(report.status, Status::Failures);
        assert_eq!(report.values.get("db").map(String::as_str), Some("ok"));
        assert_eq!(report.failures, vec!["raise".to_string(), "fail".to_string()]);
        assert_eq!(report.timeouts, vec!["long".to_string()]);
        assert!(!report.values.contains_key("long"));
    }

    #[test]
    fn test_unnamed_only_affects_status() {
        let runs = vec![run(None, text("yohoho"))];
        let report = aggregate(&runs, &Classifier::default(), Utc::now());
        assert_eq!(report.status, Status::Ok);
        assert!(report.values.is_empty());

        let runs = vec![run(None, Outcome::BooleanFailure), run(Some("db"), text("up"))];
        let report = aggregate(&runs, &Classifier::default(), Utc::now());
        assert_eq!(report.status, Status::Failures);
        assert!(report.failures.is_empty());
        assert_eq!(report.values.len(), 1);
    }

    #[test]
    fn test_nil_value_passes_without_entry() {
        let runs = vec![run(Some("noop"), Outcome::Value(CheckValue::Nil))];
        let report = aggregate(&runs, &Classifier::default(), Utc::now());
        assert_eq!(report.status, Status::Ok);
        assert!(report.values.is_empty());
    }

    #[test]
    fn test_overridden_classifier() {
        // Boolean false treated as a pass: omitted from every list.
        let classifier = Classifier::default()
            .with_failure(|o| matches!(o, Outcome::Error(_) | Outcome::Timeout(_)));
        let runs = vec![run(Some("flag"), Outcome::BooleanFailure)];
        let report = aggregate(&runs, &classifier, Utc::now());

        assert_eq!(report.status, Status::Ok);
        assert!(report.values.is_empty());
        assert!(report.failures.is_empty());
    }
}
