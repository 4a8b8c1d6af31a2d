//
// src/middleware/mod.rs
//
mod layer;
mod response;
mod service;

pub use layer::{PingLayer, PingLayerBuilder, PingOptions};
pub use response::{fallback_response, render, JSON_CONTENT_TYPE};
pub use service::{request_path, respond, MountPoint, PingService};
