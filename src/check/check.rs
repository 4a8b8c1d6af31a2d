// src/check/check.rs
use super::CheckValue;
use crate::probe::Probe;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Boxed future produced by one invocation of a check's work.
pub type CheckFuture = BoxFuture<'static, anyhow::Result<CheckValue>>;

/// Zero-argument unit of work shared by every request that runs the check.
pub type CheckWork = Arc<dyn Fn() -> CheckFuture + Send + Sync>;

/// An immutable check registration.
#[derive(Clone)]
pub struct Check {
    name: Option<String>,
    timeout: Duration,
    work: CheckWork,
}

impl Check {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

    /// Build a check from an async closure. `name` of `None` is the unnamed
    /// check, which only contributes to the overall status.
    pub fn new<F, Fut, T, E>(name: Option<&str>, work: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Into<CheckValue> + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        let work: CheckWork = Arc::new(move || -> CheckFuture {
            let fut = work();
            Box::pin(async move { fut.await.map(Into::into).map_err(Into::into) })
        });

        Self::from_work(name, work)
    }

    /// Build a check whose work is synchronous. It runs on the blocking pool;
    /// once its timeout fires the outcome is recorded even though the thread
    /// keeps running to completion.
    pub fn blocking<F, T, E>(name: Option<&str>, work: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
        T: Into<CheckValue> + Send + 'static,
        E: Into<anyhow::Error> + Send + 'static,
    {
        let work = Arc::new(work);
        let work: CheckWork = Arc::new(move || -> CheckFuture {
            let work = work.clone();
            Box::pin(async move {
                match tokio::task::spawn_blocking(move || work()).await {
                    Ok(result) => result.map(Into::into).map_err(Into::into),
                    // Re-raise so the engine records it like any other panicking check.
                    Err(err) => match err.try_into_panic() {
                        Ok(payload) => std::panic::resume_unwind(payload),
                        Err(err) => Err(anyhow::anyhow!("blocking check was cancelled: {}", err)),
                    },
                }
            })
        });

        Self::from_work(name, work)
    }

    /// Build a check backed by a [`Probe`].
    pub fn from_probe(name: Option<&str>, probe: Arc<dyn Probe>) -> Self {
        let work: CheckWork = Arc::new(move || -> CheckFuture {
            let probe = probe.clone();
            Box::pin(async move { probe.probe().await })
        });

        Self::from_work(name, work)
    }

    pub fn from_work(name: Option<&str>, work: CheckWork) -> Self {
        Self {
            name: name.map(str::to_owned),
            timeout: Self::DEFAULT_TIMEOUT,
            work,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Start one run of the work. The returned future is not timeboxed.
    pub fn call(&self) -> CheckFuture {
        (self.work)()
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
