//
// src/check/mod.rs
//
mod check;
mod registry;
mod value;

pub use check::{Check, CheckFuture, CheckWork};
pub use registry::{Registry, RESERVED_NAMES};
pub use value::CheckValue;
