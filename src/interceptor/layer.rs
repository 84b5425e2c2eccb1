use crate::interceptor::{Interceptor, Next, ResponseFuture};
use axum::{body::Body, http::Request, response::Response};
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower layer running a chain of interceptors around the wrapped service
///
/// `interceptors[0]` is the outermost: it sees the request first and the
/// response last.
#[derive(Clone)]
pub struct InterceptorLayer {
    interceptors: Arc<Vec<Arc<dyn Interceptor>>>,
}

impl InterceptorLayer {
    pub fn new(interceptors: Vec<Arc<dyn Interceptor>>) -> Self {
        Self {
            interceptors: Arc::new(interceptors),
        }
    }
}

impl<S> Layer<S> for InterceptorLayer {
    type Service = InterceptorMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InterceptorMiddleware {
            inner,
            interceptors: Arc::clone(&self.interceptors),
        }
    }
}

#[derive(Clone)]
pub struct InterceptorMiddleware<S> {
    inner: S,
    interceptors: Arc<Vec<Arc<dyn Interceptor>>>,
}

impl<S> Service<Request<Body>> for InterceptorMiddleware<S>
where
    S: Service<Request<Body>, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        // Innermost link: the wrapped service.
        let mut chain = Next::new(move |req: Request<Body>| -> ResponseFuture {
            Box::pin(async move {
                match inner.call(req).await {
                    Ok(response) => response,
                    Err(never) => match never {},
                }
            })
        });

        for interceptor in self.interceptors.iter().rev() {
            let interceptor = Arc::clone(interceptor);
            let next = chain;
            chain = Next::new(move |req: Request<Body>| -> ResponseFuture {
                Box::pin(async move { interceptor.intercept(req, next).await })
            });
        }

        Box::pin(async move { Ok(chain.run(request).await) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::HeaderValue;
    use tower::{ServiceExt, service_fn};

    struct Tag(&'static str);

    #[async_trait]
    impl Interceptor for Tag {
        async fn intercept(&self, request: Request<Body>, next: Next) -> Response {
            let mut response = next.run(request).await;
            response
                .headers_mut()
                .append("x-chain", HeaderValue::from_static(self.0));
            response
        }
    }

    #[tokio::test]
    async fn test_chain_order() {
        let outer: Arc<dyn Interceptor> = Arc::new(Tag("outer"));
        let inner: Arc<dyn Interceptor> = Arc::new(Tag("inner"));
        let layer = InterceptorLayer::new(vec![outer, inner]);
        let service = layer.layer(service_fn(|_req: Request<Body>| async {
            Ok::<_, Infallible>(Response::new(Body::empty()))
        }));

        let response = service
            .oneshot(Request::new(Body::empty()))
            .await
            .unwrap();

        let chain: Vec<_> = response
            .headers()
            .get_all("x-chain")
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        // Responses unwind inside-out.
        assert_eq!(chain, vec!["inner", "outer"]);
    }
}
