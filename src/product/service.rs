use super::error::{ProductError, ProductOperation};
use super::model::{
    NewProduct, Product, ProductCreateRequest, ProductId, ProductResponse, ProductUpdateRequest,
};
use super::repository::{ProductRepository, RepositoryError};
use crate::DeriveInjectable as Injectable;
use serde::Serialize;
use std::sync::Arc;

pub type ProductResult<T> = Result<T, ProductError>;

/// Outcome of the existence check shared by read, update and delete
#[derive(Debug)]
enum Existence {
    Found(Product),
    NotFound(ProductId),
}

impl Existence {
    fn into_found(self, operation: ProductOperation) -> ProductResult<Product> {
        match self {
            Existence::Found(product) => Ok(product),
            Existence::NotFound(id) => {
                let error = ProductError::NotFound(id);
                tracing::error!(operation = %operation, id, "{}", error);
                Err(error)
            }
        }
    }
}

/// Business rules for the product lifecycle
///
/// Holds no state of its own between calls; every operation is a single
/// pass over the repository.
#[derive(Injectable)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, req: ProductCreateRequest) -> ProductResult<ProductResponse> {
        let operation = ProductOperation::Create;
        tracing::info!(operation = %operation, name = %req.name, "Creating product");

        let submitted = payload(&req);
        let created = self
            .repository
            .insert(NewProduct::from(req))
            .await
            .map_err(|e| write_failure(operation, e, &submitted))?;

        tracing::info!(operation = %operation, id = created.id, "Product created");
        Ok(created.into())
    }

    pub async fn find_by_id(&self, id: ProductId) -> ProductResult<ProductResponse> {
        let operation = ProductOperation::Read;
        tracing::info!(operation = %operation, id, "Fetching product");

        let product = self.existence(id, operation).await?.into_found(operation)?;
        Ok(product.into())
    }

    pub async fn find_all(&self) -> ProductResult<Vec<ProductResponse>> {
        let operation = ProductOperation::FindAll;
        tracing::info!(operation = %operation, "Fetching all products");

        let products = self
            .repository
            .find_all()
            .await
            .map_err(|e| unexpected(operation, e))?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: ProductId,
        req: ProductUpdateRequest,
    ) -> ProductResult<ProductResponse> {
        let operation = ProductOperation::Update;
        tracing::info!(
            operation = %operation,
            id,
            fields = ?req.present_fields(),
            "Updating product"
        );

        let mut product = self.existence(id, operation).await?.into_found(operation)?;

        let submitted = payload(&req);
        req.apply(&mut product);
        let updated = self
            .repository
            .save(product)
            .await
            .map_err(|e| write_failure(operation, e, &submitted))?;

        tracing::info!(operation = %operation, id, "Product updated: {:?}", updated);
        Ok(updated.into())
    }

    /// Returns the id of the deleted product.
    pub async fn delete(&self, id: ProductId) -> ProductResult<ProductId> {
        let operation = ProductOperation::Delete;
        tracing::info!(operation = %operation, id, "Deleting product");

        let product = self.existence(id, operation).await?.into_found(operation)?;
        self.repository
            .delete(product)
            .await
            .map_err(|e| unexpected(operation, e))?;

        tracing::info!(operation = %operation, id, "Product deleted");
        Ok(id)
    }

    /// The only place that reads a single product from the repository.
    async fn existence(
        &self,
        id: ProductId,
        operation: ProductOperation,
    ) -> ProductResult<Existence> {
        let found = self
            .repository
            .read(id)
            .await
            .map_err(|e| unexpected(operation, e))?;

        Ok(match found {
            Some(product) => Existence::Found(product),
            None => Existence::NotFound(id),
        })
    }
}

fn payload<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unserializable>".to_string())
}

fn write_failure(
    operation: ProductOperation,
    error: RepositoryError,
    submitted: &str,
) -> ProductError {
    match error {
        RepositoryError::UniqueViolation(constraint) => {
            tracing::error!(
                operation = %operation,
                payload = submitted,
                "Product already exists: {}",
                constraint
            );
            ProductError::conflict(&constraint, submitted)
        }
        other => unexpected(operation, other),
    }
}

fn unexpected(operation: ProductOperation, source: RepositoryError) -> ProductError {
    tracing::error!(operation = %operation, error = %source, "Repository failure");
    ProductError::Repository { operation, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::model::Patch;
    use crate::product::repository::{InMemoryProductRepository, RepositoryResult};
    use async_trait::async_trait;

    fn service() -> (ProductService, Arc<InMemoryProductRepository>) {
        let repository = Arc::new(InMemoryProductRepository::new());
        let service = ProductService::new(Arc::clone(&repository) as Arc<dyn ProductRepository>);
        (service, repository)
    }

    fn create_request(name: &str, price: f64) -> ProductCreateRequest {
        ProductCreateRequest {
            name: name.to_string(),
            description: Some(format!("{name} description")),
            price,
        }
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let (service, _) = service();
        let created = service.create(create_request("Widget", 9.99)).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Widget");
        assert_eq!(service.find_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let (service, repository) = service();
        service.create(create_request("Widget", 9.99)).await.unwrap();

        let err = service.create(create_request("Widget", 5.00)).await.unwrap_err();
        match err {
            ProductError::Conflict { message } => {
                assert!(message.contains("products.name"));
                assert!(message.contains(r#""price":5.0"#));
            }
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_everywhere() {
        let (service, repository) = service();

        assert!(matches!(service.find_by_id(42).await, Err(ProductError::NotFound(42))));
        assert!(matches!(
            service.update(42, ProductUpdateRequest::default()).await,
            Err(ProductError::NotFound(42))
        ));
        assert!(matches!(service.delete(42).await, Err(ProductError::NotFound(42))));
        assert_eq!(repository.len().await, 0);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let (service, _) = service();
        let created = service.create(create_request("Widget", 9.99)).await.unwrap();

        let updated = service
            .update(
                created.id,
                ProductUpdateRequest {
                    price: Patch::Set(7.50),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.price, 7.50);
        assert_eq!(service.find_by_id(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_empty_update_is_noop() {
        let (service, _) = service();
        let created = service.create(create_request("Widget", 9.99)).await.unwrap();

        let updated = service
            .update(created.id, ProductUpdateRequest::default())
            .await
            .unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_explicit_null_clears_description() {
        let (service, _) = service();
        let created = service.create(create_request("Widget", 9.99)).await.unwrap();

        let req: ProductUpdateRequest = serde_json::from_str(r#"{"description": null}"#).unwrap();
        let updated = service.update(created.id, req).await.unwrap();
        assert_eq!(updated.description, None);
        assert_eq!(updated.price, 9.99);
    }

    #[tokio::test]
    async fn test_update_to_taken_name_is_conflict() {
        let (service, _) = service();
        service.create(create_request("Widget", 9.99)).await.unwrap();
        let gadget = service.create(create_request("Gadget", 4.50)).await.unwrap();

        let req = ProductUpdateRequest {
            name: Patch::Set("Widget".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.update(gadget.id, req).await,
            Err(ProductError::Conflict { .. })
        ));
        assert_eq!(service.find_by_id(gadget.id).await.unwrap().name, "Gadget");
    }

    #[tokio::test]
    async fn test_delete_then_everything_is_not_found() {
        let (service, _) = service();
        let created = service.create(create_request("Widget", 9.99)).await.unwrap();

        assert_eq!(service.delete(created.id).await.unwrap(), created.id);
        assert!(matches!(service.find_by_id(created.id).await, Err(ProductError::NotFound(_))));
        assert!(matches!(
            service.update(created.id, ProductUpdateRequest::default()).await,
            Err(ProductError::NotFound(_))
        ));
        assert!(matches!(service.delete(created.id).await, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_all() {
        let (service, _) = service();
        assert!(service.find_all().await.unwrap().is_empty());

        let mut created = Vec::new();
        for (name, price) in [("Widget", 9.99), ("Gadget", 4.50), ("Gizmo", 1.25)] {
            created.push(service.create(create_request(name, price)).await.unwrap());
        }

        let all = service.find_all().await.unwrap();
        assert_eq!(all.len(), 3);
        for product in &created {
            assert_eq!(all.iter().filter(|p| *p == product).count(), 1);
        }
    }

    struct UnavailableRepository;

    #[async_trait]
    impl ProductRepository for UnavailableRepository {
        async fn insert(&self, _product: NewProduct) -> RepositoryResult<Product> {
            Err(RepositoryError::Storage("connection refused".to_string()))
        }

        async fn save(&self, _product: Product) -> RepositoryResult<Product> {
            Err(RepositoryError::Storage("connection refused".to_string()))
        }

        async fn read(&self, _id: ProductId) -> RepositoryResult<Option<Product>> {
            Err(RepositoryError::Storage("connection refused".to_string()))
        }

        async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
            Err(RepositoryError::Storage("connection refused".to_string()))
        }

        async fn delete(&self, _product: Product) -> RepositoryResult<()> {
            Err(RepositoryError::Storage("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_storage_failures_are_not_domain_errors() {
        let service = ProductService::new(Arc::new(UnavailableRepository));

        assert!(matches!(
            service.create(create_request("Widget", 9.99)).await,
            Err(ProductError::Repository { operation: ProductOperation::Create, .. })
        ));
        assert!(matches!(
            service.find_by_id(1).await,
            Err(ProductError::Repository { operation: ProductOperation::Read, .. })
        ));
        assert!(matches!(
            service.find_all().await,
            Err(ProductError::Repository { operation: ProductOperation::FindAll, .. })
        ));
    }
}
