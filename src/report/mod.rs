//
// src/report/mod.rs
//
mod aggregator;
mod document;

pub use aggregator::aggregate;
pub use document::{Report, Status};
