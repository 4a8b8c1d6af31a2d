// src/server/handler.rs
use hyper::{Body, Request, Response, StatusCode};
use std::convert::Infallible;
use std::task::{Context, Poll};
use tower::Service;

/// Stand-in downstream application for the standalone binary: every request
/// that is not a ping gets a 404.
#[derive(Clone, Default)]
pub struct NotFoundHandler;

impl NotFoundHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Service<Request<Body>> for NotFoundHandler {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = futures::future::Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        tracing::debug!("No route for {} {}", req.method(), req.uri().path());

        let mut response = Response::new(Body::from("Not Found"));
        *response.status_mut() = StatusCode::NOT_FOUND;
        futures::future::ready(Ok(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_everything_is_not_found() {
        let req = Request::builder().uri("/anything").body(Body::empty()).unwrap();
        let response = NotFoundHandler::new().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
