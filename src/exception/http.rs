use crate::common::ErrorResponse;
use crate::exception::{ExceptionFilter, HttpException};
use axum::response::{IntoResponse, Response};
use std::any::Any;
use std::error::Error;

/// Answers client errors with their own status and message; anything in the
/// 5xx range becomes a fixed-message 500.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpExceptionFilter;

impl ExceptionFilter for HttpExceptionFilter {
    fn catch(&self, error: &dyn HttpException) -> Response {
        let status = error.status();
        let body = if status.is_server_error() {
            tracing::error!(error = %error, source = ?error.source(), "Unhandled error");
            ErrorResponse::internal()
        } else {
            ErrorResponse::new(status, error.to_string())
        };
        body.into_response()
    }

    fn catch_panic(&self, panic: Box<dyn Any + Send + 'static>) -> Response {
        let detail = panic
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| panic.downcast_ref::<&str>().copied())
            .unwrap_or("unknown panic payload");
        tracing::error!(detail, "Handler panicked");
        ErrorResponse::internal().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::INTERNAL_ERROR_MESSAGE;
    use axum::http::StatusCode;

    #[derive(Debug, thiserror::Error)]
    enum LedgerError {
        #[error("Entry {0} is locked")]
        Locked(u32),

        #[error("ledger store unreachable at db01:5432")]
        Unreachable,
    }

    impl HttpException for LedgerError {
        fn status(&self) -> StatusCode {
            match self {
                LedgerError::Locked(_) => StatusCode::CONFLICT,
                LedgerError::Unreachable => StatusCode::SERVICE_UNAVAILABLE,
            }
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_client_error_keeps_status_and_message() {
        let response = HttpExceptionFilter.catch(&LedgerError::Locked(3));
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["statusCode"], 409);
        assert_eq!(body["message"], "Entry 3 is locked");
    }

    #[tokio::test]
    async fn test_server_error_hides_detail() {
        let response = HttpExceptionFilter.catch(&LedgerError::Unreachable);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
        assert!(!body.to_string().contains("db01"));
    }

    #[tokio::test]
    async fn test_panic_maps_to_fixed_500() {
        let response = HttpExceptionFilter.catch_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], INTERNAL_ERROR_MESSAGE);
    }
}
