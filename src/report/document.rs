// src/report/document.rs
use chrono::{DateTime, Utc};
use hyper::StatusCode;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Failures,
}

impl Status {
    /// Wire value. Monitoring consumers match on these exact strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Failures => "failures",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            Status::Ok => StatusCode::OK,
            Status::Failures => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// The status document for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub now: DateTime<Utc>,
    pub status: Status,
    /// Stringified values of passing named checks, in registration order.
    pub values: IndexMap<String, String>,
    pub failures: Vec<String>,
    pub timeouts: Vec<String>,
}

impl Report {
    pub fn new(now: DateTime<Utc>, status: Status) -> Self {
        Self {
            now,
            status,
            values: IndexMap::new(),
            failures: Vec::new(),
            timeouts: Vec::new(),
        }
    }

    pub fn http_status(&self) -> StatusCode {
        self.status.http_status()
    }
}

// Flat object: `now`, `status`, one key per check value, then the
// `failures`/`timeouts` arrays when they are non-empty.
impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("now", &self.now.timestamp().to_string())?;
        map.serialize_entry("status", self.status.as_str())?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        if !self.failures.is_empty() {
            map.serialize_entry("failures", &self.failures)?;
        }
        if !self.timeouts.is_empty() {
            map.serialize_entry("timeouts", &self.timeouts)?;
        }
        map.end()
    }
}
