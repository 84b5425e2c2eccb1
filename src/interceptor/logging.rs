use crate::interceptor::{Interceptor, Next};
use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use std::time::Instant;

/// Logs method, URI, status and latency of every request
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn intercept(&self, request: Request<Body>, next: Next) -> Response {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let start = Instant::now();

        tracing::debug!(%method, %uri, "--> request");

        let response = next.run(request).await;
        let status = response.status();
        let elapsed = start.elapsed();

        if status.is_server_error() {
            tracing::error!(%method, %uri, status = status.as_u16(), ?elapsed, "<-- response");
        } else {
            tracing::info!(%method, %uri, status = status.as_u16(), ?elapsed, "<-- response");
        }
        response
    }
}
