use crate::guard::Guard;
use axum::{body::Body, http::Request, response::IntoResponse, response::Response};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower layer running a guard in front of the wrapped service
///
/// A rejection answers the request; the inner service is never called in
/// that case.
#[derive(Clone)]
pub struct GuardLayer {
    guard: Arc<dyn Guard>,
}

impl GuardLayer {
    pub fn new(guard: Arc<dyn Guard>) -> Self {
        Self { guard }
    }
}

impl<S> Layer<S> for GuardLayer {
    type Service = GuardMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GuardMiddleware {
            inner,
            guard: Arc::clone(&self.guard),
        }
    }
}

#[derive(Clone)]
pub struct GuardMiddleware<S> {
    inner: S,
    guard: Arc<dyn Guard>,
}

impl<S> Service<Request<Body>> for GuardMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let guard = Arc::clone(&self.guard);
        // The instance that was polled ready serves this request.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let (parts, body) = request.into_parts();
            if let Err(rejection) = guard.can_activate(&parts).await {
                return Ok(rejection.into_response());
            }
            inner.call(Request::from_parts(parts, body)).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::{GuardError, GuardResult};
    use async_trait::async_trait;
    use axum::http::{StatusCode, request::Parts};
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct HeaderGuard;

    #[async_trait]
    impl Guard for HeaderGuard {
        async fn can_activate(&self, request: &Parts) -> GuardResult {
            if request.headers.contains_key("x-allow") {
                Ok(())
            } else {
                Err(GuardError::Unauthorized("missing x-allow".into()))
            }
        }
    }

    #[tokio::test]
    async fn test_rejection_skips_inner_service() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let inner = tower::service_fn(move |_request: Request<Body>| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, Infallible>(Response::new(Body::empty())) }
        });
        let service = GuardLayer::new(Arc::new(HeaderGuard)).layer(inner);

        let rejected = service
            .clone()
            .oneshot(Request::new(Body::empty()))
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let request = Request::builder()
            .header("x-allow", "1")
            .body(Body::empty())
            .unwrap();
        let allowed = service.oneshot(request).await.unwrap();
        assert_eq!(allowed.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
