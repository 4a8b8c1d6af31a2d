// src/middleware/service.rs
use super::response::{fallback_response, render};
use crate::engine::Engine;
use crate::error::PingError;
use crate::metrics::MetricsCollector;
use crate::report::Status;
use futures::future::BoxFuture;
use futures::FutureExt;
use hyper::{Body, Request, Response};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

/// Prefix a host mounted this service under. Inserted as a request
/// extension; it is stripped before the path is compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint(pub String);

#[derive(Clone)]
pub struct PingService<S> {
    inner: S,
    path: Arc<str>,
    engine: Arc<Engine>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl<S> PingService<S> {
    pub fn new(
        inner: S,
        path: Arc<str>,
        engine: Arc<Engine>,
        metrics: Option<Arc<MetricsCollector>>,
    ) -> Self {
        Self {
            inner,
            path,
            engine,
            metrics,
        }
    }

    fn matches<B>(&self, req: &Request<B>) -> bool {
        request_path(req) == &*self.path
    }
}

/// Path of `req` relative to its [`MountPoint`], if any.
pub fn request_path<B>(req: &Request<B>) -> &str {
    let path = req.uri().path();
    let Some(MountPoint(prefix)) = req.extensions().get::<MountPoint>() else {
        return path;
    };

    match path.strip_prefix(prefix.trim_end_matches('/')) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

impl<S> Service<Request<Body>> for PingService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + 'static,
    S::Future: Send + 'static,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        if !self.matches(&req) {
            return Box::pin(self.inner.call(req));
        }

        let engine = self.engine.clone();
        let metrics = self.metrics.clone();
        Box::pin(async move { Ok(respond(&engine, metrics.as_deref()).await) })
    }
}

/// Run the checks and answer. Never fails: anything that goes wrong outside
/// an individual check yields the fallback document.
pub async fn respond(engine: &Engine, metrics: Option<&MetricsCollector>) -> Response<Body> {
    let request_id = Uuid::new_v4();
    let span = info_span!("ping", %request_id);

    async move {
        let result = AssertUnwindSafe(evaluate_and_render(engine))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok((status, response))) => {
                info!(status = status.as_str(), "Ping answered");
                if let Some(metrics) = metrics {
                    metrics.record_request(status.as_str());
                }
                response
            }
            Ok(Err(err)) => {
                error!(error = %err, "Ping failed, sending fallback document");
                fallback(metrics)
            }
            Err(_) => {
                error!("Ping pipeline panicked, sending fallback document");
                fallback(metrics)
            }
        }
    }
    .instrument(span)
    .await
}

async fn evaluate_and_render(engine: &Engine) -> Result<(Status, Response<Body>), PingError> {
    let report = engine.evaluate().await?;
    let response = render(&report)?;
    Ok((report.status, response))
}

fn fallback(metrics: Option<&MetricsCollector>) -> Response<Body> {
    if let Some(metrics) = metrics {
        metrics.record_fallback();
    }
    fallback_response()
}
