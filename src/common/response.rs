use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Fixed message for failures whose detail must not reach the caller
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred on the server";

/// JSON body of every error response
///
/// ```json
/// {"statusCode": 404, "message": "Product 1 not found.", "timestamp": "2026-01-01T00:00:00+00:00"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
    pub timestamp: String,
    #[serde(skip)]
    http_status: Option<StatusCode>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            http_status: Some(status),
        }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }

    pub fn status(&self) -> StatusCode {
        self.http_status
            .or_else(|| StatusCode::from_u16(self.status_code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_shape() {
        let body = serde_json::to_value(ErrorResponse::new(StatusCode::NOT_FOUND, "gone")).unwrap();
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["message"], "gone");
        assert!(body["timestamp"].is_string());
    }

    #[test]
    fn test_internal_uses_fixed_message() {
        let error = ErrorResponse::internal();
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message, INTERNAL_ERROR_MESSAGE);
    }
}
