use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use std::future::Future;
use std::pin::Pin;

mod layer;
mod logging;

pub use layer::{InterceptorLayer, InterceptorMiddleware};
pub use logging::LoggingInterceptor;

pub type ResponseFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

type NextFn = Box<dyn FnOnce(Request<Body>) -> ResponseFuture + Send>;

/// The rest of the chain: remaining interceptors, then the handler
pub struct Next {
    run: NextFn,
}

impl Next {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Request<Body>) -> ResponseFuture + Send + 'static,
    {
        Self { run: Box::new(f) }
    }

    pub async fn run(self, request: Request<Body>) -> Response {
        (self.run)(request).await
    }
}

/// Wraps request handling
///
/// Interceptors can inspect or replace the request before calling `next`,
/// and inspect or replace the response after it returns.
///
/// # Example
/// ```ignore
/// struct Timing;
///
/// #[async_trait]
/// impl Interceptor for Timing {
///     async fn intercept(&self, req: Request<Body>, next: Next) -> Response {
///         let started = Instant::now();
///         let res = next.run(req).await;
///         tracing::debug!("took {:?}", started.elapsed());
///         res
///     }
/// }
/// ```
#[async_trait]
pub trait Interceptor: Send + Sync + 'static {
    async fn intercept(&self, request: Request<Body>, next: Next) -> Response;
}
