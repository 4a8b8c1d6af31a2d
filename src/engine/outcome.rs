// src/engine/outcome.rs
use crate::check::CheckValue;
use crate::error::CheckError;
use std::time::Duration;

/// Raw result of running one check once, before classification.
#[derive(Debug)]
pub enum Outcome {
    Value(CheckValue),
    /// The work returned boolean `false`.
    BooleanFailure,
    Error(CheckError),
    /// The check's own timeout fired; carries the budget that was exceeded.
    Timeout(Duration),
}

impl Outcome {
    pub fn from_result(result: anyhow::Result<CheckValue>) -> Self {
        match result {
            Ok(CheckValue::Bool(false)) => Outcome::BooleanFailure,
            Ok(value) => Outcome::Value(value),
            Err(err) => Outcome::Error(CheckError::Failed(err)),
        }
    }

    pub fn value(&self) -> Option<&CheckValue> {
        match self {
            Outcome::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Value(_) => "value",
            Outcome::BooleanFailure => "false",
            Outcome::Error(_) => "error",
            Outcome::Timeout(_) => "timeout",
        }
    }
}

/// One check's outcome for the current request.
#[derive(Debug)]
pub struct CheckRun {
    pub name: Option<String>,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

impl CheckRun {
    pub fn new(name: Option<&str>, outcome: Outcome, elapsed: Duration) -> Self {
        Self {
            name: name.map(str::to_owned),
            outcome,
            elapsed,
        }
    }
}
