// src/engine/classifier.rs
use super::Outcome;
use crate::check::CheckValue;
use std::fmt;
use std::sync::Arc;

pub type Predicate = Arc<dyn Fn(&Outcome) -> bool + Send + Sync>;

/// Decides what counts as unhealthy. Both predicates can be swapped
/// independently of each other.
#[derive(Clone)]
pub struct Classifier {
    failure: Predicate,
    timeout: Predicate,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            failure: Arc::new(default_is_failure),
            timeout: Arc::new(default_is_timeout),
        }
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Outcome) -> bool + Send + Sync + 'static,
    {
        self.failure = Arc::new(predicate);
        self
    }

    pub fn with_timeout<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Outcome) -> bool + Send + Sync + 'static,
    {
        self.timeout = Arc::new(predicate);
        self
    }

    pub fn is_failure(&self, outcome: &Outcome) -> bool {
        (self.failure)(outcome)
    }

    pub fn is_timeout(&self, outcome: &Outcome) -> bool {
        (self.timeout)(outcome)
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier").finish_non_exhaustive()
    }
}

/// Errors, timeouts and a boolean `false` are failures.
pub fn default_is_failure(outcome: &Outcome) -> bool {
    match outcome {
        Outcome::Value(value) => *value == CheckValue::Bool(false),
        Outcome::BooleanFailure | Outcome::Error(_) | Outcome::Timeout(_) => true,
    }
}

pub fn default_is_timeout(outcome: &Outcome) -> bool {
    matches!(outcome, Outcome::Timeout(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckError;
    use std::time::Duration;

    #[test]
    fn test_default_failure_policy() {
        let classifier = Classifier::default();

        assert!(classifier.is_failure(&Outcome::Error(CheckError::Failed(anyhow::anyhow!("x")))));
        assert!(classifier.is_failure(&Outcome::BooleanFailure));
        assert!(classifier.is_failure(&Outcome::Timeout(Duration::from_secs(1))));

        assert!(!classifier.is_failure(&Outcome::Value(CheckValue::Bool(true))));
        assert!(!classifier.is_failure(&Outcome::Value(CheckValue::Text("ok".into()))));
        assert!(!classifier.is_failure(&Outcome::Value(CheckValue::Nil)));
    }

    #[test]
    fn test_default_timeout_policy() {
        let classifier = Classifier::default();

        assert!(classifier.is_timeout(&Outcome::Timeout(Duration::from_millis(5))));
        assert!(!classifier.is_timeout(&Outcome::Error(CheckError::Panicked("x".into()))));
        assert!(!classifier.is_timeout(&Outcome::BooleanFailure));
    }

    #[test]
    fn test_predicates_override_independently() {
        // Boolean false is only a soft signal for this deployment.
        let classifier = Classifier::default()
            .with_failure(|o| matches!(o, Outcome::Error(_) | Outcome::Timeout(_)));

        assert!(!classifier.is_failure(&Outcome::BooleanFailure));
        assert!(classifier.is_timeout(&Outcome::Timeout(Duration::from_millis(5))));

        let classifier = Classifier::default().with_timeout(|_| false);
        assert!(classifier.is_failure(&Outcome::Timeout(Duration::from_millis(5))));
        assert!(!classifier.is_timeout(&Outcome::Timeout(Duration::from_millis(5))));
    }
}
