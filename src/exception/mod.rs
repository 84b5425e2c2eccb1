use axum::http::StatusCode;
use axum::response::Response;
use std::any::Any;
use std::error::Error;

pub mod http;

pub use http::HttpExceptionFilter;

/// An error that knows which HTTP status it answers with
///
/// Server-error statuses are treated as internal: their message is logged,
/// never sent.
pub trait HttpException: Error + Send + Sync + 'static {
    fn status(&self) -> StatusCode;
}

/// Turns errors that escape a handler into responses
pub trait ExceptionFilter: Send + Sync + 'static {
    /// Catch an error and return a response
    fn catch(&self, error: &dyn HttpException) -> Response;

    /// Catch a handler panic and return a response
    fn catch_panic(&self, panic: Box<dyn Any + Send + 'static>) -> Response;
}
