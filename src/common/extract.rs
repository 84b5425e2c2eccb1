//! Extractors whose rejections use the JSON error body.

use super::ErrorResponse;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts};

/// `axum::Json` request body; a malformed body answers with [`ErrorResponse`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ErrorResponse))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` parameters; an unparsable segment answers with
/// [`ErrorResponse`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ErrorResponse))]
pub struct PathParam<T>(pub T);

impl From<JsonRejection> for ErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(
            status = rejection.status().as_u16(),
            "Rejected request body: {}",
            rejection
        );
        ErrorResponse::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!(status = rejection.status().as_u16(), "Rejected path: {}", rejection);
        ErrorResponse::new(rejection.status(), rejection.body_text())
    }
}
