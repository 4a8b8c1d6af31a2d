// src/lib.rs
pub mod check;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod probe;
pub mod report;
pub mod server;

pub use check::{Check, CheckValue, Registry};
pub use engine::{Classifier, Engine, Outcome};
pub use error::{CheckError, ConfigError, PingError};
pub use middleware::{MountPoint, PingLayer, PingOptions, PingService};
pub use report::{Report, Status};
