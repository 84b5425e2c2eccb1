use crate::auth::{AuthError, TokenValidator};
use crate::common::ErrorResponse;
use crate::DeriveInjectable as Injectable;
use async_trait::async_trait;
use axum::http::{HeaderValue, StatusCode, header, request::Parts};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

mod layer;

pub use layer::{GuardLayer, GuardMiddleware};

/// Ok(()) lets the request through; Err rejects it before the handler runs.
pub type GuardResult = Result<(), GuardError>;

#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let GuardError::Unauthorized(reason) = self;
        let mut response = ErrorResponse::new(StatusCode::UNAUTHORIZED, reason).into_response();
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        response
    }
}

/// Protects routes
///
/// Guards only see the request head; the body is never buffered.
#[async_trait]
pub trait Guard: Send + Sync + 'static {
    async fn can_activate(&self, request: &Parts) -> GuardResult;
}

/// Requires `Authorization: Bearer <token>` accepted by the token validator
#[derive(Injectable)]
pub struct BearerAuthGuard {
    validator: Arc<dyn TokenValidator>,
}

impl BearerAuthGuard {
    pub fn new(validator: Arc<dyn TokenValidator>) -> Self {
        Self { validator }
    }

    fn bearer_token(request: &Parts) -> Result<&str, AuthError> {
        let value = request
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingCredentials)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        match value.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => Ok(token.trim()),
            _ => Err(AuthError::UnsupportedScheme),
        }
    }
}

#[async_trait]
impl Guard for BearerAuthGuard {
    async fn can_activate(&self, request: &Parts) -> GuardResult {
        Self::bearer_token(request)
            .and_then(|token| self.validator.validate(token))
            .map_err(|e| {
                tracing::warn!(
                    method = %request.method,
                    uri = %request.uri,
                    "Rejected request: {}",
                    e
                );
                GuardError::Unauthorized(e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenValidator;
    use axum::http::Request;

    fn parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/products/");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn guard() -> BearerAuthGuard {
        BearerAuthGuard::new(Arc::new(StaticTokenValidator::new(["secret"])))
    }

    #[tokio::test]
    async fn test_accepts_valid_token() {
        assert!(guard().can_activate(&parts(Some("Bearer secret"))).await.is_ok());
        assert!(guard().can_activate(&parts(Some("bearer secret"))).await.is_ok());
    }

    #[tokio::test]
    async fn test_rejects_missing_wrong_scheme_and_bad_token() {
        for header in [None, Some("Basic c2VjcmV0"), Some("Bearer nope"), Some("Bearer")] {
            let result = guard().can_activate(&parts(header)).await;
            assert!(
                matches!(result, Err(GuardError::Unauthorized(_))),
                "header {header:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_unauthorized_response() {
        let response = GuardError::Unauthorized("Invalid or expired token".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }
}
