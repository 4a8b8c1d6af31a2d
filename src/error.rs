// src/error.rs
use std::time::Duration;

/// Rejected configuration, raised while the registry or layer is being built.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("check {name:?} has a non-positive timeout ({timeout:?})")]
    InvalidTimeout { name: Option<String>, timeout: Duration },

    #[error("overall deadline must be positive, got {0:?}")]
    InvalidDeadline(Duration),

    #[error("check name {0:?} collides with a reserved document key")]
    ReservedName(String),

    #[error("ping path must start with '/', got {0:?}")]
    InvalidPath(String),

    #[error("invalid probe definition: {0}")]
    InvalidProbe(String),
}

/// Error carried by a check that failed on its own terms.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("{0}")]
    Failed(#[from] anyhow::Error),

    #[error("check panicked: {0}")]
    Panicked(String),
}

/// Failure of the orchestration around the checks. Always rendered as the
/// fallback document.
#[derive(Debug, thiserror::Error)]
pub enum PingError {
    #[error("checks did not finish within the overall deadline of {0:?}")]
    DeadlineExceeded(Duration),

    #[error("check task for {name:?} was lost: {reason}")]
    TaskLost { name: Option<String>, reason: String },

    #[error("failed to render status document: {0}")]
    Render(#[from] serde_json::Error),
}
