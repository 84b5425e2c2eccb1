use super::model::ProductId;
use super::repository::RepositoryError;
use crate::exception::{ExceptionFilter, HttpException, HttpExceptionFilter};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// Product service operations, used as log and error context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ProductOperation {
    Create,
    Read,
    FindAll,
    Update,
    Delete,
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("{message}")]
    Conflict { message: String },

    #[error("Product {0} not found.")]
    NotFound(ProductId),

    /// Anything the repository reports other than a uniqueness violation.
    #[error("{operation} failed: {source}")]
    Repository {
        operation: ProductOperation,
        #[source]
        source: RepositoryError,
    },
}

impl ProductError {
    pub fn conflict(constraint: &str, submitted: &str) -> Self {
        Self::Conflict {
            message: format!("Product already exists: {constraint} (submitted: {submitted})"),
        }
    }
}

impl HttpException for ProductError {
    fn status(&self) -> StatusCode {
        match self {
            ProductError::Conflict { .. } => StatusCode::CONFLICT,
            ProductError::NotFound(_) => StatusCode::NOT_FOUND,
            ProductError::Repository { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        HttpExceptionFilter.catch(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names() {
        assert_eq!(ProductOperation::FindAll.to_string(), "find_all");
        let name: &'static str = ProductOperation::Delete.into();
        assert_eq!(name, "delete");
    }

    #[test]
    fn test_messages() {
        assert_eq!(ProductError::NotFound(7).to_string(), "Product 7 not found.");

        let conflict = ProductError::conflict(
            "UNIQUE constraint failed: products.name",
            r#"{"name":"Widget","price":5.0}"#,
        );
        let message = conflict.to_string();
        assert!(message.contains("products.name"));
        assert!(message.contains(r#""name":"Widget""#));
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let response = ProductError::NotFound(3).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Product 3 not found.");
    }

    #[tokio::test]
    async fn test_conflict_response() {
        let response = ProductError::conflict("c", "{}").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["statusCode"], 409);
    }

    #[tokio::test]
    async fn test_repository_failure_response_hides_detail() {
        let error = ProductError::Repository {
            operation: ProductOperation::Read,
            source: RepositoryError::Storage("connection reset by peer".to_string()),
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], crate::common::INTERNAL_ERROR_MESSAGE);
        assert!(!body.to_string().contains("connection reset"));
    }
}
