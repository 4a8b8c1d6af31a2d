// src/check/registry.rs
use super::{Check, CheckValue};
use crate::error::ConfigError;
use crate::probe::Probe;
use indexmap::IndexMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Keys the status document already uses. A check with one of these names
/// would clobber them.
pub const RESERVED_NAMES: [&str; 4] = ["now", "status", "failures", "timeouts"];

/// Checks keyed by name, with `None` as the single unnamed slot.
///
/// Insertion order is preserved and is the order in which `failures` and
/// `timeouts` are reported. Re-registering a name swaps the whole check but
/// keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    checks: IndexMap<Option<String>, Arc<Check>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a fully built check.
    pub fn add(&mut self, check: Check) -> Result<Arc<Check>, ConfigError> {
        if check.timeout().is_zero() {
            return Err(ConfigError::InvalidTimeout {
                name: check.name().map(str::to_owned),
                timeout: check.timeout(),
            });
        }
        if let Some(name) = check.name() {
            if RESERVED_NAMES.contains(&name) {
                return Err(ConfigError::ReservedName(name.to_string()));
            }
        }

        let key = check.name().map(str::to_owned);
        let check = Arc::new(check);
        if self.checks.insert(key, check.clone()).is_some() {
            debug!("Replaced check {:?}", check.name());
        }
        Ok(check)
    }

    /// Register `work` under `name` (or the unnamed slot), with an optional
    /// timeout that defaults to one second.
    pub fn register<F, Fut, T, E>(
        &mut self,
        name: Option<&str>,
        timeout: Option<Duration>,
        work: F,
    ) -> Result<Arc<Check>, ConfigError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Into<CheckValue> + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        let check = Check::new(name, work);
        self.add(with_optional_timeout(check, timeout))
    }

    /// Named check with the default timeout.
    pub fn check<F, Fut, T, E>(&mut self, name: &str, work: F) -> Result<Arc<Check>, ConfigError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Into<CheckValue> + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.register(Some(name), None, work)
    }

    /// Unnamed check with the default timeout.
    pub fn check_unnamed<F, Fut, T, E>(&mut self, work: F) -> Result<Arc<Check>, ConfigError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Into<CheckValue> + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.register(None, None, work)
    }

    pub fn register_blocking<F, T, E>(
        &mut self,
        name: Option<&str>,
        timeout: Option<Duration>,
        work: F,
    ) -> Result<Arc<Check>, ConfigError>
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
        T: Into<CheckValue> + Send + 'static,
        E: Into<anyhow::Error> + Send + 'static,
    {
        let check = Check::blocking(name, work);
        self.add(with_optional_timeout(check, timeout))
    }

    pub fn register_probe(
        &mut self,
        name: Option<&str>,
        timeout: Option<Duration>,
        probe: Arc<dyn Probe>,
    ) -> Result<Arc<Check>, ConfigError> {
        let check = Check::from_probe(name, probe);
        self.add(with_optional_timeout(check, timeout))
    }

    pub fn get(&self, name: Option<&str>) -> Option<&Arc<Check>> {
        self.checks.get(&name.map(str::to_owned))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Check>> {
        self.checks.values()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

fn with_optional_timeout(check: Check, timeout: Option<Duration>) -> Check {
    match timeout {
        Some(timeout) => check.with_timeout(timeout),
        None => check,
    }
}
