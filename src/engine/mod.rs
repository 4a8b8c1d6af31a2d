//
// src/engine/mod.rs
//
mod classifier;
mod executor;
mod outcome;

pub use classifier::{default_is_failure, default_is_timeout, Classifier, Predicate};
pub use executor::{run_check, Engine};
pub use outcome::{CheckRun, Outcome};
